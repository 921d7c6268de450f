// ==========================================
// 洗衣预约系统 - 配置层
// ==========================================
// 职责: 门店排期配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod schedule_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use schedule_config_trait::ScheduleConfigReader;
