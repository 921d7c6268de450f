// ==========================================
// 洗衣预约系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 配置值错误 =====
    #[error("配置值无效: key={key}, value={value}, 原因={reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("配置解析失败: key={key}, value={value}")]
    ParseError { key: String, value: String },

    // ===== 存储错误 =====
    #[error("配置存储失败: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("配置快照格式错误: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("配置锁获取失败: {0}")]
    LockError(String),
}

impl ConfigError {
    /// 构造配置值无效错误
    pub fn invalid(key: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
