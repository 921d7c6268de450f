// ==========================================
// 洗衣预约系统 - 取件上下文
// ==========================================
// 职责: 一次自取窗口计算的完整输入（取件时刻 + 预约类型）
// 红线: 取件日期与时段必须由调用方一次性给全，缺失即报错
// ==========================================

use crate::domain::error::{SchedulingError, SchedulingResult};
use crate::domain::types::BookingType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ==========================================
// PickupContext - 取件上下文
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupContext {
    pub pickup_moment: NaiveDateTime, // 取件日期 + 取件时段起点
    pub booking_type: BookingType,    // 预约类型
}

impl PickupContext {
    pub fn new(pickup_moment: NaiveDateTime, booking_type: BookingType) -> Self {
        Self {
            pickup_moment,
            booking_type,
        }
    }

    /// 由取件日历与取件时段组件的原始输出构造上下文
    ///
    /// # 参数
    /// - pickup_date: 取件日期（未选择时为 None）
    /// - slot_start: 取件时段起点（未选择时为 None）
    /// - booking_type: 预约类型
    ///
    /// # 返回
    /// - Err(PreconditionViolation): 日期或时段缺失
    pub fn resolve(
        pickup_date: Option<NaiveDate>,
        slot_start: Option<NaiveTime>,
        booking_type: BookingType,
    ) -> SchedulingResult<Self> {
        match (pickup_date, slot_start) {
            (Some(date), Some(time)) => Ok(Self::new(date.and_time(time), booking_type)),
            (None, Some(_)) => Err(SchedulingError::precondition("取件日期未选择")),
            (Some(_), None) => Err(SchedulingError::precondition("取件时段未选择")),
            (None, None) => Err(SchedulingError::precondition("取件日期与时段均未选择")),
        }
    }

    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_moment.date()
    }

    /// 同一取件时刻，切换预约类型后的新上下文
    pub fn with_booking_type(&self, booking_type: BookingType) -> Self {
        Self::new(self.pickup_moment, booking_type)
    }
}
