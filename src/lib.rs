// ==========================================
// 洗衣预约系统 - 自取排期核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 取件后自取窗口计算、自取日历与选择状态
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排期规则
pub mod engine;

// 配置层 - 门店规则配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - UI 事件处理器接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BookingType, DeliveryEstimate, SelectionPhase};

// 领域实体
pub use domain::{
    ClaimSummary, ClaimTicket, ClaimWindow, DayBounds, PickupContext, SchedulingError,
    SchedulingResult, ShopSchedule, ShopScheduleBuilder,
};

// 引擎
pub use engine::{
    compute_claim_window, CalendarCell, ClaimAvailabilityView, ClaimSelectionState,
    ClaimWindowCalculator, DisplayedMonth, PickupAvailabilityView, TimeSlot,
};

// API
pub use api::{ApiError, ApiResult, BookingScheduleApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "洗衣预约系统";
