// ==========================================
// 洗衣预约系统 - 取件可用性视图
// ==========================================
// 职责: 取件日历单元格与取件时段的可选判定
// 规则:
// - 日期: 当前显示月份内、不早于今天、非休息日
// - 时段: 营业时间内切分；今天已开始的时段不可选
// ==========================================

use crate::domain::shop::ShopSchedule;
use crate::engine::calendar::{slot_ranges, CalendarCell, DisplayedMonth, TimeSlot};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy)]
pub struct PickupAvailabilityView<'a> {
    schedule: &'a ShopSchedule,
    now: NaiveDateTime,
    displayed: DisplayedMonth,
}

impl<'a> PickupAvailabilityView<'a> {
    pub fn new(schedule: &'a ShopSchedule, now: NaiveDateTime, displayed: DisplayedMonth) -> Self {
        Self {
            schedule,
            now,
            displayed,
        }
    }

    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        self.displayed.contains(date)
            && date >= self.now.date()
            && self.schedule.is_working_day(date)
    }

    /// 时段起点须在 [开门, 关门) 内且不早于当前时刻
    pub fn is_slot_available(&self, date: NaiveDate, start: NaiveTime) -> bool {
        self.is_date_available(date)
            && start >= self.schedule.open_time()
            && start < self.schedule.close_time()
            && date.and_time(start) >= self.now
    }

    pub fn time_slots(&self, date: NaiveDate) -> Vec<TimeSlot> {
        slot_ranges(
            self.schedule.open_time(),
            self.schedule.close_time(),
            self.schedule.pickup_slot_minutes(),
        )
        .into_iter()
        .map(|(start, end)| TimeSlot {
            start,
            end,
            available: self.is_slot_available(date, start),
        })
        .collect()
    }

    pub fn month_view(&self) -> Vec<CalendarCell> {
        let today = self.now.date();
        self.displayed
            .grid_dates()
            .into_iter()
            .map(|date| CalendarCell {
                date,
                in_month: self.displayed.contains(date),
                is_today: date == today,
                available: self.is_date_available(date),
            })
            .collect()
    }
}
