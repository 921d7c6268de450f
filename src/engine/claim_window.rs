// ==========================================
// 洗衣预约系统 - 自取窗口计算引擎
// ==========================================
// 职责: 取件时刻 + 预约类型 → 就绪时刻、可自取日期、每日时间边界
// 输入: PickupContext + ShopSchedule
// 输出: ClaimWindow（纯计算，无副作用）
// ==========================================
// 规则:
// 1) 就绪时刻 = 取件时刻 + 加工时长（加急 4h，普通 60h，可配置）
// 2) 就绪时刻 ≤ 关门时间 且 非休息日 → 当天可取，最早 max(就绪, 开门)
//    否则顺延到下一个营业日开门时间
// 3) 首日之后追加 N 个营业日（加急 1，普通 2），遇休息日跳过
// 4) 中间日全天营业时段；末日若保管截止时刻落在当天则收窄上限
// ==========================================

use crate::domain::claim::{ClaimWindow, DayBounds};
use crate::domain::error::{SchedulingError, SchedulingResult};
use crate::domain::pickup::PickupContext;
use crate::domain::shop::ShopSchedule;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::instrument;

// ==========================================
// ClaimWindowCalculator - 自取窗口计算引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ClaimWindowCalculator {
    schedule: ShopSchedule,
}

impl ClaimWindowCalculator {
    pub fn new(schedule: ShopSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &ShopSchedule {
        &self.schedule
    }

    /// 带前置条件检查的入口
    ///
    /// 取件上下文缺失时返回 PreconditionViolation，不做任何默认值替换
    pub fn compute_checked(&self, pickup: Option<&PickupContext>) -> SchedulingResult<ClaimWindow> {
        let pickup = pickup.ok_or_else(|| {
            SchedulingError::precondition("未提供取件时刻，无法计算自取窗口")
        })?;
        Ok(self.compute(pickup))
    }

    /// 计算自取窗口
    ///
    /// 对合法的 ShopSchedule / PickupContext 为全函数，不会失败
    #[instrument(skip(self, pickup), fields(
        pickup_moment = %pickup.pickup_moment,
        booking_type = %pickup.booking_type,
    ))]
    pub fn compute(&self, pickup: &PickupContext) -> ClaimWindow {
        let schedule = &self.schedule;
        let readiness = pickup.pickup_moment + schedule.processing_offset(pickup.booking_type);

        // 1. 首个可自取日
        let first = self.earliest_claim_day(readiness);

        // 2. 追加营业日
        let mut dates = vec![first.date];
        while dates.len() < pickup.booking_type.claim_day_count() {
            let last = dates[dates.len() - 1];
            dates.push(schedule.next_working_day(last));
        }

        // 3. 每日边界
        let mut days: Vec<DayBounds> = dates
            .iter()
            .enumerate()
            .map(|(idx, &date)| {
                if idx == 0 {
                    first
                } else {
                    self.full_day(date)
                }
            })
            .collect();

        // 4. 保管截止时刻收窄末日上限
        let end_moment = schedule.claim_hold().map(|hold| readiness + hold);
        if let (Some(end), Some(last)) = (end_moment, days.last_mut()) {
            if end.date() == last.date && last.min <= end && end < last.max {
                last.max = end;
            }
        }

        tracing::debug!(
            readiness = %readiness,
            first_date = %days[0].date,
            day_count = days.len(),
            "自取窗口计算完成"
        );

        ClaimWindow {
            pickup: *pickup,
            readiness_moment: readiness,
            end_moment,
            days,
            closed_weekday: schedule.closed_weekday(),
            shop_open: schedule.open_time(),
            shop_close: schedule.close_time(),
        }
    }

    /// 就绪时刻所在日的自取边界，或顺延后的首个营业日
    ///
    /// 关门时间为闭区间：就绪恰为关门时刻时当天仍可取
    fn earliest_claim_day(&self, readiness: NaiveDateTime) -> DayBounds {
        let schedule = &self.schedule;
        let date = readiness.date();

        if readiness.time() <= schedule.close_time() && schedule.is_working_day(date) {
            // 开门前就绪 → 以开门时间为下限
            let min = readiness.max(schedule.opens_at(date));
            return DayBounds {
                date,
                min,
                max: schedule.closes_at(date),
            };
        }

        self.full_day(schedule.next_working_day(date))
    }

    fn full_day(&self, date: NaiveDate) -> DayBounds {
        DayBounds {
            date,
            min: self.schedule.opens_at(date),
            max: self.schedule.closes_at(date),
        }
    }
}

/// 自由函数形式: computeClaimWindow(pickupContext, shopSchedule)
pub fn compute_claim_window(pickup: &PickupContext, schedule: &ShopSchedule) -> ClaimWindow {
    ClaimWindowCalculator::new(schedule.clone()).compute(pickup)
}

/// 两个日期之间（不含端点）是否只有休息日
///
/// 用于校验相邻可选日期之间的间隔
pub fn only_closed_days_between(schedule: &ShopSchedule, from: NaiveDate, to: NaiveDate) -> bool {
    from.iter_days()
        .skip(1)
        .take_while(|d| *d < to)
        .all(|d| d.weekday() == schedule.closed_weekday())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BookingType;
    use chrono::{NaiveTime, Weekday};

    // ==========================================
    // 测试数据准备
    // ==========================================

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        d.and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    /// 2026-10-19 周一
    fn monday() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn calc() -> ClaimWindowCalculator {
        ClaimWindowCalculator::new(ShopSchedule::default())
    }

    // ==========================================
    // 加急单
    // ==========================================

    #[test]
    fn test_rush_same_day_readiness() {
        let pickup = PickupContext::new(at(monday(), 10, 0), BookingType::Rush);
        let window = calc().compute(&pickup);

        assert_eq!(window.readiness_moment, at(monday(), 14, 0));
        assert_eq!(window.allowed_date_list(), vec![monday(), date(2026, 10, 20)]);
        assert_eq!(window.days[0].min, at(monday(), 14, 0));
        assert_eq!(window.days[0].max, at(monday(), 17, 0));
        assert_eq!(window.days[1].min, at(date(2026, 10, 20), 6, 0));
        assert_eq!(window.days[1].max, at(date(2026, 10, 20), 17, 0));
    }

    #[test]
    fn test_rush_after_close_skips_sunday() {
        let saturday = date(2026, 10, 17);
        let pickup = PickupContext::new(at(saturday, 15, 0), BookingType::Rush);
        let window = calc().compute(&pickup);

        assert_eq!(window.readiness_moment, at(saturday, 19, 0));
        assert_eq!(window.allowed_date_list(), vec![monday(), date(2026, 10, 20)]);
        assert_eq!(window.days[0].min, at(monday(), 6, 0));
    }

    #[test]
    fn test_readiness_exactly_at_close_is_same_day() {
        let pickup = PickupContext::new(at(monday(), 13, 0), BookingType::Rush);
        let window = calc().compute(&pickup);

        assert_eq!(window.days[0].date, monday());
        assert_eq!(window.days[0].min, at(monday(), 17, 0));
        assert_eq!(window.days[0].max, at(monday(), 17, 0));
    }

    #[test]
    fn test_readiness_one_minute_after_close_moves_on() {
        let pickup = PickupContext::new(at(monday(), 13, 1), BookingType::Rush);
        let window = calc().compute(&pickup);
        assert_eq!(window.days[0].date, date(2026, 10, 20));
    }

    #[test]
    fn test_readiness_before_open_clamped_to_open() {
        // 01:00 取件 → 05:00 就绪 → 当天 06:00 起可取
        let pickup = PickupContext::new(at(monday(), 1, 0), BookingType::Rush);
        let window = calc().compute(&pickup);

        assert_eq!(window.days[0].date, monday());
        assert_eq!(window.days[0].min, at(monday(), 6, 0));
    }

    // ==========================================
    // 普通单
    // ==========================================

    #[test]
    fn test_normal_wednesday_skips_sunday() {
        // 周三 09:00 + 60h = 周五 21:00 → 周六、（跳过周日）周一、周二
        let wednesday = date(2026, 10, 14);
        let pickup = PickupContext::new(at(wednesday, 9, 0), BookingType::Normal);
        let window = calc().compute(&pickup);

        assert_eq!(window.readiness_moment, at(date(2026, 10, 16), 21, 0));
        assert_eq!(
            window.allowed_date_list(),
            vec![date(2026, 10, 17), date(2026, 10, 19), date(2026, 10, 20)]
        );
        assert!(window.allowed_dates().all(|d| d.weekday() != Weekday::Sun));
    }

    #[test]
    fn test_normal_middle_day_full_hours() {
        let pickup = PickupContext::new(at(monday(), 6, 0), BookingType::Normal);
        let window = calc().compute(&pickup);

        // 周一 06:00 + 60h = 周三 18:00 → 周四、周五、周六
        assert_eq!(window.days.len(), 3);
        let middle = window.days[1];
        assert_eq!(middle.min.time(), NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(middle.max.time(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    // ==========================================
    // 保管截止时刻
    // ==========================================

    #[test]
    fn test_claim_hold_caps_last_day() {
        let schedule = ShopSchedule::builder()
            .claim_hold_hours(Some(24))
            .build()
            .unwrap();
        let calc = ClaimWindowCalculator::new(schedule);
        // 周一 10:00 加急 → 14:00 就绪 → 周二 14:00 截止
        let pickup = PickupContext::new(at(monday(), 10, 0), BookingType::Rush);
        let window = calc.compute(&pickup);

        assert_eq!(window.end_moment, Some(at(date(2026, 10, 20), 14, 0)));
        assert_eq!(window.days[1].max, at(date(2026, 10, 20), 14, 0));
        assert_eq!(window.days[0].max, at(monday(), 17, 0));
    }

    #[test]
    fn test_claim_hold_on_other_day_ignored() {
        let schedule = ShopSchedule::builder()
            .claim_hold_hours(Some(200))
            .build()
            .unwrap();
        let calc = ClaimWindowCalculator::new(schedule);
        let pickup = PickupContext::new(at(monday(), 10, 0), BookingType::Rush);
        let window = calc.compute(&pickup);

        assert!(window.end_moment.is_some());
        assert_eq!(window.days[1].max, at(date(2026, 10, 20), 17, 0));
    }

    // ==========================================
    // 前置条件
    // ==========================================

    #[test]
    fn test_compute_checked_without_pickup() {
        let err = calc().compute_checked(None).unwrap_err();
        assert!(matches!(err, SchedulingError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_free_function_matches_calculator() {
        let pickup = PickupContext::new(at(monday(), 10, 0), BookingType::Normal);
        let schedule = ShopSchedule::default();
        assert_eq!(
            compute_claim_window(&pickup, &schedule),
            ClaimWindowCalculator::new(schedule).compute(&pickup)
        );
    }

    #[test]
    fn test_only_closed_days_between() {
        let schedule = ShopSchedule::default();
        assert!(only_closed_days_between(&schedule, date(2026, 10, 17), date(2026, 10, 19)));
        assert!(only_closed_days_between(&schedule, date(2026, 10, 19), date(2026, 10, 20)));
        assert!(!only_closed_days_between(&schedule, date(2026, 10, 19), date(2026, 10, 21)));
    }
}
