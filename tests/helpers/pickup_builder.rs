// ==========================================
// 取件上下文批量生成
// ==========================================

use chrono::{Duration, NaiveDate, NaiveTime};
use laundry_claim::{BookingType, PickupContext};

/// 从 start 起连续 days 天、营业时间内每个整点、两种预约类型的全部取件上下文
pub fn pickup_grid(start: NaiveDate, days: i64, first_hour: u32, last_hour: u32) -> Vec<PickupContext> {
    let mut contexts = Vec::new();
    for offset in 0..days {
        let date = start + Duration::days(offset);
        for hour in first_hour..=last_hour {
            let slot = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
            for booking_type in [BookingType::Normal, BookingType::Rush] {
                contexts.push(PickupContext::new(date.and_time(slot), booking_type));
            }
        }
    }
    contexts
}
