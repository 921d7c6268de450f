// ==========================================
// 洗衣预约系统 - 排期错误类型
// ==========================================
// 两类错误均为本地同步错误，直接返回给调用方（UI 层）
// 引擎自身不做兜底：缺失取件时间时绝不默认为"今天 + 普通单"
// ==========================================

use thiserror::Error;

/// 排期引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// 调用方未提供完整的取件时间（日期 + 时段）
    #[error("前置条件不满足: {reason}")]
    PreconditionViolation { reason: String },

    /// 选择的自取日期/时间不在当前自取窗口内
    #[error("自取选择无效: {reason}")]
    InvalidSelection { reason: String },
}

impl SchedulingError {
    pub fn precondition(reason: impl Into<String>) -> Self {
        SchedulingError::PreconditionViolation {
            reason: reason.into(),
        }
    }

    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        SchedulingError::InvalidSelection {
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type SchedulingResult<T> = Result<T, SchedulingError>;
