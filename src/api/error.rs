// ==========================================
// 洗衣预约系统 - API层错误类型
// ==========================================
// 职责: 将引擎/配置层错误转换为带错误码与本地化文案的 API 错误
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::error::SchedulingError;
use crate::i18n;
use serde::Serialize;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 排期错误
    // ==========================================
    #[error("前置条件不满足: {0}")]
    PreconditionViolation(String),

    #[error("自取选择无效: {0}")]
    InvalidSelection(String),

    // ==========================================
    // 配置与输入错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定错误码（供 UI 层分支判断）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::PreconditionViolation(_) => "PRECONDITION_VIOLATION",
            ApiError::InvalidSelection(_) => "INVALID_SELECTION",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    fn detail(&self) -> &str {
        match self {
            ApiError::PreconditionViolation(d)
            | ApiError::InvalidSelection(d)
            | ApiError::ConfigError(d)
            | ApiError::InvalidInput(d)
            | ApiError::InternalError(d) => d,
        }
    }

    /// 按当前语言生成的用户提示
    pub fn user_message(&self) -> String {
        let key = match self {
            ApiError::PreconditionViolation(_) => "error.precondition",
            ApiError::InvalidSelection(_) => "error.invalid_selection",
            ApiError::ConfigError(_) => "error.config",
            ApiError::InvalidInput(_) => "error.invalid_input",
            ApiError::InternalError(_) => "error.internal",
        };
        i18n::t_with_args(key, &[("detail", self.detail())])
    }

    /// 序列化给 UI 层的错误体
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.user_message(),
            detail: self.detail().to_string(),
        }
    }
}

// ==========================================
// 从 SchedulingError 转换
// ==========================================
impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::PreconditionViolation { reason } => {
                ApiError::PreconditionViolation(reason)
            }
            SchedulingError::InvalidSelection { reason } => ApiError::InvalidSelection(reason),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { .. } | ConfigError::ParseError { .. } => {
                ApiError::ConfigError(err.to_string())
            }
            ConfigError::Snapshot(e) => ApiError::InvalidInput(format!("配置快照格式错误: {}", e)),
            ConfigError::Storage(e) => ApiError::InternalError(format!("配置存储失败: {}", e)),
            ConfigError::LockError(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// UI 层错误体
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub detail: String,
}
