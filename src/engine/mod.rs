// ==========================================
// 洗衣预约系统 - 引擎层
// ==========================================
// 职责: 自取窗口计算、可用性判定、选择状态维护
// 红线: 引擎不做兜底，错误原样返回调用方
// ==========================================

pub mod availability;
pub mod calendar;
pub mod claim_window;
pub mod pickup_availability;
pub mod selection;

// 重导出核心引擎
pub use availability::ClaimAvailabilityView;
pub use calendar::{CalendarCell, DisplayedMonth, TimeSlot};
pub use claim_window::{compute_claim_window, ClaimWindowCalculator};
pub use pickup_availability::PickupAvailabilityView;
pub use selection::ClaimSelectionState;
