// ==========================================
// 洗衣预约系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、错误
// 红线: 不含存储逻辑,不含引擎逻辑
// ==========================================

pub mod claim;
pub mod error;
pub mod pickup;
pub mod shop;
pub mod types;

// 重导出核心类型
pub use claim::{ClaimSummary, ClaimTicket, ClaimWindow, DayBounds};
pub use error::{SchedulingError, SchedulingResult};
pub use pickup::PickupContext;
pub use shop::{ShopSchedule, ShopScheduleBuilder};
pub use types::{BookingType, DeliveryEstimate, SelectionPhase};
