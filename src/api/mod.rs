// ==========================================
// 洗衣预约系统 - API层
// ==========================================
// 职责: 为 UI 事件处理器提供业务接口
// 错误: 统一转换为 ApiError（错误码 + 本地化文案）
// ==========================================

pub mod booking_api;
pub mod error;

pub use booking_api::{BookingScheduleApi, ClaimWindowView, SelectionSnapshot, SubmitReadiness};
pub use error::{ApiError, ApiResult, ErrorResponse};
