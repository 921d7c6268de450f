// ==========================================
// 洗衣预约系统 - 日历与时段基础结构
// ==========================================
// 职责: 月视图网格（周日起始 6×7）、日历单元格、时段
// 说明: 取件与自取两个可用性视图共用
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// 月视图固定 6 周
pub const GRID_CELLS: usize = 42;

// ==========================================
// DisplayedMonth - 当前显示的月份
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayedMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
}

impl DisplayedMonth {
    /// month 取 1-12，非法时返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self {
            year,
            month,
            first_day,
        })
    }

    /// 包含 date 的月份
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        // 下月 1 日 = 本月 1 日 + 31 天所在月
        Self::of(self.first_day + Duration::days(31))
    }

    pub fn prev(&self) -> Self {
        Self::of(self.first_day - Duration::days(1))
    }

    /// 周日起始的 42 个日期（含上月尾与下月头）
    pub fn grid_dates(&self) -> Vec<NaiveDate> {
        let lead = self.first_day.weekday().num_days_from_sunday() as i64;
        let start = self.first_day - Duration::days(lead);
        start.iter_days().take(GRID_CELLS).collect()
    }
}

// ==========================================
// CalendarCell - 日历单元格
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub available: bool,
}

// ==========================================
// TimeSlot - 时段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub available: bool,
}

/// 营业时段内按步长切分 [open, close)，末段截断到 close
pub fn slot_ranges(open: NaiveTime, close: NaiveTime, step_minutes: u32) -> Vec<(NaiveTime, NaiveTime)> {
    let open_min = open.num_seconds_from_midnight() / 60;
    let close_min = close.num_seconds_from_midnight() / 60;
    let step = step_minutes.max(1);

    (open_min..close_min)
        .step_by(step as usize)
        .filter_map(|start| {
            let end = (start + step).min(close_min);
            Some((minute_of_day(start)?, minute_of_day(end)?))
        })
        .collect()
}

fn minute_of_day(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_displayed_month_validation() {
        assert!(DisplayedMonth::new(2026, 13).is_none());
        assert!(DisplayedMonth::new(2026, 0).is_none());
        let m = DisplayedMonth::new(2026, 10).unwrap();
        assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
    }

    #[test]
    fn test_month_navigation_across_year() {
        let dec = DisplayedMonth::new(2026, 12).unwrap();
        assert_eq!(dec.next(), DisplayedMonth::new(2027, 1).unwrap());
        let jan = DisplayedMonth::new(2027, 1).unwrap();
        assert_eq!(jan.prev(), dec);
        // 31 天的月份
        let jan31 = DisplayedMonth::new(2026, 1).unwrap();
        assert_eq!(jan31.next(), DisplayedMonth::new(2026, 2).unwrap());
    }

    #[test]
    fn test_grid_starts_on_sunday() {
        // 2026-10-01 是周四 → 网格从 2026-09-27 周日开始
        let grid = DisplayedMonth::new(2026, 10).unwrap().grid_dates();
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2026, 9, 27).unwrap());
        assert_eq!(grid[0].weekday(), Weekday::Sun);
        assert_eq!(grid[4], NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
    }

    #[test]
    fn test_slot_ranges_hourly() {
        let slots = slot_ranges(time(6, 0), time(17, 0), 60);
        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0], (time(6, 0), time(7, 0)));
        assert_eq!(slots[10], (time(16, 0), time(17, 0)));
    }

    #[test]
    fn test_slot_ranges_truncates_last() {
        let slots = slot_ranges(time(6, 0), time(8, 0), 45);
        assert_eq!(
            slots,
            vec![
                (time(6, 0), time(6, 45)),
                (time(6, 45), time(7, 30)),
                (time(7, 30), time(8, 0)),
            ]
        );
    }
}
