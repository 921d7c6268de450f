// ==========================================
// 洗衣预约系统 - 门店营业规则
// ==========================================
// 职责: 营业时间、休息日、各预约类型的加工时长
// 红线: 构造后不可变；所有取值在 build() 时校验
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::BookingType;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::Serialize;

// ==========================================
// 默认值
// ==========================================

pub const DEFAULT_OPEN_HOUR: u32 = 6;
pub const DEFAULT_CLOSE_HOUR: u32 = 17;
/// 0 = 周日
pub const DEFAULT_CLOSED_WEEKDAY: u32 = 0;
pub const DEFAULT_RUSH_OFFSET_HOURS: u32 = 4;
/// 普通单: 2 天 12 小时
pub const DEFAULT_NORMAL_OFFSET_HOURS: u32 = 60;
pub const DEFAULT_CLAIM_SLOT_MINUTES: u32 = 60;
pub const DEFAULT_PICKUP_SLOT_MINUTES: u32 = 60;
/// 加工时长与保管时长上限: 31 天
pub const MAX_OFFSET_HOURS: u32 = 24 * 31;

/// 周日起算的星期索引 (0 = 周日 ... 6 = 周六) 转换为 Weekday
pub fn weekday_from_sunday_index(index: u32) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

// ==========================================
// ShopSchedule - 门店营业规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopSchedule {
    open_time: NaiveTime,
    close_time: NaiveTime,
    closed_weekday: Weekday,
    rush_offset_hours: u32,
    normal_offset_hours: u32,
    claim_hold_hours: Option<u32>,
    claim_slot_minutes: u32,
    pickup_slot_minutes: u32,
}

impl Default for ShopSchedule {
    fn default() -> Self {
        Self {
            open_time: NaiveTime::from_hms_opt(DEFAULT_OPEN_HOUR, 0, 0).unwrap_or_default(),
            close_time: NaiveTime::from_hms_opt(DEFAULT_CLOSE_HOUR, 0, 0).unwrap_or_default(),
            closed_weekday: Weekday::Sun,
            rush_offset_hours: DEFAULT_RUSH_OFFSET_HOURS,
            normal_offset_hours: DEFAULT_NORMAL_OFFSET_HOURS,
            claim_hold_hours: None,
            claim_slot_minutes: DEFAULT_CLAIM_SLOT_MINUTES,
            pickup_slot_minutes: DEFAULT_PICKUP_SLOT_MINUTES,
        }
    }
}

impl ShopSchedule {
    pub fn builder() -> ShopScheduleBuilder {
        ShopScheduleBuilder::default()
    }

    // ===== 营业时间 =====

    pub fn open_time(&self) -> NaiveTime {
        self.open_time
    }

    pub fn close_time(&self) -> NaiveTime {
        self.close_time
    }

    pub fn open_hour(&self) -> u32 {
        self.open_time.hour()
    }

    pub fn close_hour(&self) -> u32 {
        self.close_time.hour()
    }

    pub fn opens_at(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.open_time)
    }

    pub fn closes_at(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.close_time)
    }

    // ===== 休息日 =====

    pub fn closed_weekday(&self) -> Weekday {
        self.closed_weekday
    }

    pub fn is_closed_on(&self, date: NaiveDate) -> bool {
        date.weekday() == self.closed_weekday
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_closed_on(date)
    }

    /// 严格晚于 date 的下一个营业日
    pub fn next_working_day(&self, date: NaiveDate) -> NaiveDate {
        let mut next = date + Duration::days(1);
        while self.is_closed_on(next) {
            next += Duration::days(1);
        }
        next
    }

    // ===== 加工时长 =====

    pub fn processing_offset_hours(&self, booking_type: BookingType) -> u32 {
        match booking_type {
            BookingType::Rush => self.rush_offset_hours,
            BookingType::Normal => self.normal_offset_hours,
        }
    }

    pub fn processing_offset(&self, booking_type: BookingType) -> Duration {
        Duration::hours(self.processing_offset_hours(booking_type) as i64)
    }

    /// 就绪后最长保管时长（未配置时自取窗口按营业日结束）
    pub fn claim_hold(&self) -> Option<Duration> {
        self.claim_hold_hours.map(|h| Duration::hours(h as i64))
    }

    pub fn claim_hold_hours(&self) -> Option<u32> {
        self.claim_hold_hours
    }

    // ===== 时段粒度 =====

    pub fn claim_slot_minutes(&self) -> u32 {
        self.claim_slot_minutes
    }

    pub fn pickup_slot_minutes(&self) -> u32 {
        self.pickup_slot_minutes
    }
}

// ==========================================
// ShopScheduleBuilder
// ==========================================
#[derive(Debug, Clone)]
pub struct ShopScheduleBuilder {
    open_hour: u32,
    close_hour: u32,
    closed_weekday: u32,
    rush_offset_hours: u32,
    normal_offset_hours: u32,
    claim_hold_hours: Option<u32>,
    claim_slot_minutes: u32,
    pickup_slot_minutes: u32,
}

impl Default for ShopScheduleBuilder {
    fn default() -> Self {
        Self {
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
            closed_weekday: DEFAULT_CLOSED_WEEKDAY,
            rush_offset_hours: DEFAULT_RUSH_OFFSET_HOURS,
            normal_offset_hours: DEFAULT_NORMAL_OFFSET_HOURS,
            claim_hold_hours: None,
            claim_slot_minutes: DEFAULT_CLAIM_SLOT_MINUTES,
            pickup_slot_minutes: DEFAULT_PICKUP_SLOT_MINUTES,
        }
    }
}

impl ShopScheduleBuilder {
    pub fn hours(mut self, open_hour: u32, close_hour: u32) -> Self {
        self.open_hour = open_hour;
        self.close_hour = close_hour;
        self
    }

    /// 0 = 周日 ... 6 = 周六
    pub fn closed_weekday_index(mut self, index: u32) -> Self {
        self.closed_weekday = index;
        self
    }

    pub fn closed_weekday(mut self, weekday: Weekday) -> Self {
        self.closed_weekday = weekday.num_days_from_sunday();
        self
    }

    pub fn rush_offset_hours(mut self, hours: u32) -> Self {
        self.rush_offset_hours = hours;
        self
    }

    pub fn normal_offset_hours(mut self, hours: u32) -> Self {
        self.normal_offset_hours = hours;
        self
    }

    pub fn claim_hold_hours(mut self, hours: Option<u32>) -> Self {
        self.claim_hold_hours = hours;
        self
    }

    pub fn claim_slot_minutes(mut self, minutes: u32) -> Self {
        self.claim_slot_minutes = minutes;
        self
    }

    pub fn pickup_slot_minutes(mut self, minutes: u32) -> Self {
        self.pickup_slot_minutes = minutes;
        self
    }

    /// 校验并构造 ShopSchedule
    ///
    /// # 校验规则
    /// - open_hour < close_hour ≤ 23
    /// - closed_weekday ∈ 0..=6
    /// - 时段粒度 > 0
    /// - 加工时长 ≤ MAX_OFFSET_HOURS
    /// - 保管时长若配置则在 1..=MAX_OFFSET_HOURS
    pub fn build(self) -> ConfigResult<ShopSchedule> {
        if self.close_hour > 23 {
            return Err(ConfigError::invalid(
                "shop_close_hour",
                self.close_hour,
                "必须在 0-23 之间",
            ));
        }
        if self.open_hour >= self.close_hour {
            return Err(ConfigError::invalid(
                "shop_open_hour",
                self.open_hour,
                "开门时间必须早于关门时间",
            ));
        }

        let closed_weekday = weekday_from_sunday_index(self.closed_weekday).ok_or_else(|| {
            ConfigError::invalid("shop_closed_weekday", self.closed_weekday, "必须在 0-6 之间")
        })?;

        if self.claim_slot_minutes == 0 {
            return Err(ConfigError::invalid("claim_slot_minutes", 0, "必须大于 0"));
        }
        if self.pickup_slot_minutes == 0 {
            return Err(ConfigError::invalid("pickup_slot_minutes", 0, "必须大于 0"));
        }
        for (key, hours) in [
            ("rush_offset_hours", self.rush_offset_hours),
            ("normal_offset_hours", self.normal_offset_hours),
        ] {
            if hours > MAX_OFFSET_HOURS {
                return Err(ConfigError::invalid(key, hours, "不能超过 744 小时（31 天）"));
            }
        }
        match self.claim_hold_hours {
            Some(0) => {
                return Err(ConfigError::invalid("claim_hold_hours", 0, "必须大于 0"));
            }
            Some(hours) if hours > MAX_OFFSET_HOURS => {
                return Err(ConfigError::invalid(
                    "claim_hold_hours",
                    hours,
                    "不能超过 744 小时（31 天）",
                ));
            }
            _ => {}
        }

        let open_time = NaiveTime::from_hms_opt(self.open_hour, 0, 0)
            .ok_or_else(|| ConfigError::invalid("shop_open_hour", self.open_hour, "无效小时"))?;
        let close_time = NaiveTime::from_hms_opt(self.close_hour, 0, 0)
            .ok_or_else(|| ConfigError::invalid("shop_close_hour", self.close_hour, "无效小时"))?;

        Ok(ShopSchedule {
            open_time,
            close_time,
            closed_weekday,
            rush_offset_hours: self.rush_offset_hours,
            normal_offset_hours: self.normal_offset_hours,
            claim_hold_hours: self.claim_hold_hours,
            claim_slot_minutes: self.claim_slot_minutes,
            pickup_slot_minutes: self.pickup_slot_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_matches_builder() {
        let built = ShopSchedule::builder().build().unwrap();
        assert_eq!(built, ShopSchedule::default());
        assert_eq!(built.open_hour(), 6);
        assert_eq!(built.close_hour(), 17);
        assert_eq!(built.closed_weekday(), Weekday::Sun);
    }

    #[test]
    fn test_build_rejects_inverted_hours() {
        let err = ShopSchedule::builder().hours(17, 6).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "shop_open_hour"));

        let err = ShopSchedule::builder().hours(8, 8).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ShopSchedule::builder().hours(6, 24).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "shop_close_hour"));
    }

    #[test]
    fn test_build_rejects_bad_weekday_and_slots() {
        assert!(ShopSchedule::builder().closed_weekday_index(7).build().is_err());
        assert!(ShopSchedule::builder().claim_slot_minutes(0).build().is_err());
        assert!(ShopSchedule::builder().pickup_slot_minutes(0).build().is_err());
        assert!(ShopSchedule::builder().claim_hold_hours(Some(0)).build().is_err());
    }

    #[test]
    fn test_build_rejects_oversized_offsets() {
        let err = ShopSchedule::builder().rush_offset_hours(u32::MAX).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "rush_offset_hours"));

        let err = ShopSchedule::builder()
            .normal_offset_hours(MAX_OFFSET_HOURS + 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "normal_offset_hours"));

        let err = ShopSchedule::builder()
            .claim_hold_hours(Some(u32::MAX))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "claim_hold_hours"));

        // 上限本身合法
        let schedule = ShopSchedule::builder()
            .rush_offset_hours(MAX_OFFSET_HOURS)
            .normal_offset_hours(MAX_OFFSET_HOURS)
            .claim_hold_hours(Some(MAX_OFFSET_HOURS))
            .build()
            .unwrap();
        assert_eq!(schedule.processing_offset_hours(BookingType::Rush), MAX_OFFSET_HOURS);
    }

    #[test]
    fn test_next_working_day_skips_closed_weekday() {
        let schedule = ShopSchedule::default();
        // 2026-10-17 周六 → 2026-10-19 周一
        assert_eq!(schedule.next_working_day(date(2026, 10, 17)), date(2026, 10, 19));
        // 周一 → 周二
        assert_eq!(schedule.next_working_day(date(2026, 10, 19)), date(2026, 10, 20));
        // 周日 → 周一
        assert_eq!(schedule.next_working_day(date(2026, 10, 18)), date(2026, 10, 19));
    }

    #[test]
    fn test_custom_closed_weekday() {
        let schedule = ShopSchedule::builder()
            .closed_weekday(Weekday::Wed)
            .build()
            .unwrap();
        // 2026-10-20 周二 → 跳过周三 → 周四
        assert_eq!(schedule.next_working_day(date(2026, 10, 20)), date(2026, 10, 22));
        assert!(schedule.is_working_day(date(2026, 10, 18)));
    }

    #[test]
    fn test_processing_offset() {
        let schedule = ShopSchedule::default();
        assert_eq!(schedule.processing_offset(BookingType::Rush), Duration::hours(4));
        assert_eq!(schedule.processing_offset(BookingType::Normal), Duration::hours(60));
    }
}
