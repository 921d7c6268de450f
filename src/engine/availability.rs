// ==========================================
// 洗衣预约系统 - 自取可用性视图
// ==========================================
// 职责: 判定日历单元格是否可点、时段是否可选
// 输入: 已计算的 ClaimWindow + 今天 + 当前显示月份
// 红线: 每次渲染单元格都会调用，不得重算窗口
// ==========================================

use crate::domain::claim::ClaimWindow;
use crate::engine::calendar::{slot_ranges, CalendarCell, DisplayedMonth, TimeSlot};
use chrono::{Datelike, NaiveDate, NaiveTime};

// ==========================================
// ClaimAvailabilityView - 自取可用性视图
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ClaimAvailabilityView<'a> {
    window: &'a ClaimWindow,
    today: NaiveDate,
    displayed: DisplayedMonth,
}

impl<'a> ClaimAvailabilityView<'a> {
    pub fn new(window: &'a ClaimWindow, today: NaiveDate, displayed: DisplayedMonth) -> Self {
        Self {
            window,
            today,
            displayed,
        }
    }

    pub fn window(&self) -> &ClaimWindow {
        self.window
    }

    pub fn displayed(&self) -> DisplayedMonth {
        self.displayed
    }

    /// 仅按窗口成员关系判断
    pub fn is_member(&self, date: NaiveDate) -> bool {
        self.window.contains_date(date)
    }

    /// 日期是否可选
    ///
    /// 非当前显示月份、早于今天、休息日一律不可选；
    /// 其余按窗口成员关系判断（两种判断对窗口内日期必须一致）
    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        if !self.displayed.contains(date) || date < self.today {
            return false;
        }
        if date.weekday() == self.window.closed_weekday {
            return false;
        }
        self.is_member(date)
    }

    /// 时段是否可选（闭区间 [min, max]）
    pub fn is_time_slot_available(&self, date: NaiveDate, time: NaiveTime) -> bool {
        if !self.is_date_available(date) {
            return false;
        }
        self.window
            .day_bounds(date)
            .map_or(false, |bounds| bounds.contains_time(time))
    }

    /// 当天全部营业时段，按起点判定可选
    pub fn time_slots(&self, date: NaiveDate, slot_minutes: u32) -> Vec<TimeSlot> {
        slot_ranges(self.window.shop_open, self.window.shop_close, slot_minutes)
            .into_iter()
            .map(|(start, end)| TimeSlot {
                start,
                end,
                available: self.is_time_slot_available(date, start),
            })
            .collect()
    }

    /// 月视图网格
    pub fn month_view(&self) -> Vec<CalendarCell> {
        self.displayed
            .grid_dates()
            .into_iter()
            .map(|date| CalendarCell {
                date,
                in_month: self.displayed.contains(date),
                is_today: date == self.today,
                available: self.is_date_available(date),
            })
            .collect()
    }
}
