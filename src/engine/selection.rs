// ==========================================
// 洗衣预约系统 - 自取选择状态
// ==========================================
// 职责: 保存用户当前选择的自取日期/时间，维护不变量
// 状态机:
//   Unset --select_date--> DateOnly --select_time--> Complete
//   DateOnly/Complete --select_date--> DateOnly（原时间在新日期无效时清除）
//   任意状态 --reset / recompute_for_new_pickup--> Unset
// 红线: 非法迁移直接返回错误，不修改任何状态
// ==========================================

use crate::domain::claim::{ClaimSummary, ClaimWindow, DayBounds};
use crate::domain::error::{SchedulingError, SchedulingResult};
use crate::domain::pickup::PickupContext;
use crate::domain::shop::ShopSchedule;
use crate::domain::types::SelectionPhase;
use crate::engine::claim_window::ClaimWindowCalculator;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ==========================================
// ClaimSelectionState - 自取选择状态
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ClaimSelectionState {
    calculator: ClaimWindowCalculator,
    window: Option<ClaimWindow>,
    selected_date: Option<NaiveDate>,
    selected_time: Option<NaiveTime>,
}

impl ClaimSelectionState {
    pub fn new(schedule: ShopSchedule) -> Self {
        Self {
            calculator: ClaimWindowCalculator::new(schedule),
            window: None,
            selected_date: None,
            selected_time: None,
        }
    }

    // ==========================================
    // 读取
    // ==========================================

    pub fn schedule(&self) -> &ShopSchedule {
        self.calculator.schedule()
    }

    pub fn window(&self) -> Option<&ClaimWindow> {
        self.window.as_ref()
    }

    pub fn pickup(&self) -> Option<&PickupContext> {
        self.window.as_ref().map(|w| &w.pickup)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.selected_time
    }

    pub fn selected_moment(&self) -> Option<NaiveDateTime> {
        Some(self.selected_date?.and_time(self.selected_time?))
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.selected_date, self.selected_time) {
            (None, _) => SelectionPhase::Unset,
            (Some(_), None) => SelectionPhase::DateOnly,
            (Some(_), Some(_)) => SelectionPhase::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == SelectionPhase::Complete
    }

    /// 选择完成后的摘要（供收据/表单校验）
    pub fn summary(&self) -> Option<ClaimSummary> {
        let window = self.window.as_ref()?;
        Some(ClaimSummary {
            booking_type: window.pickup.booking_type,
            pickup_moment: window.pickup.pickup_moment,
            readiness_moment: window.readiness_moment,
            claim_date: self.selected_date?,
            claim_time: self.selected_time?,
        })
    }

    // ==========================================
    // 迁移
    // ==========================================

    /// 选择自取日期
    ///
    /// # 返回
    /// - Err(InvalidSelection): 尚无窗口，或日期不在窗口内
    ///
    /// 已选时间在新日期边界内时保留（阶段仍为 Complete），否则清除并回到 DateOnly；
    /// 这是对"重选日期回到 DateOnly"的有意放宽，见 DESIGN.md「Time retention on date change」
    pub fn select_date(&mut self, date: NaiveDate) -> SchedulingResult<()> {
        let bounds = *self.bounds_for(date)?;

        if let Some(time) = self.selected_time {
            if !bounds.contains_time(time) {
                tracing::debug!(%date, %time, "新日期下原自取时间无效，已清除");
                self.selected_time = None;
            }
        }
        self.selected_date = Some(date);
        Ok(())
    }

    /// 选择自取时间
    ///
    /// # 返回
    /// - Err(InvalidSelection): 未选日期，或时间超出当天边界
    pub fn select_time(&mut self, time: NaiveTime) -> SchedulingResult<()> {
        let date = self
            .selected_date
            .ok_or_else(|| SchedulingError::invalid_selection("请先选择自取日期"))?;
        let bounds = self.bounds_for(date)?;

        if !bounds.contains_time(time) {
            tracing::debug!(%date, %time, min = %bounds.min, max = %bounds.max, "自取时间超出当天边界");
            return Err(SchedulingError::invalid_selection(format!(
                "{} {} 不在可自取时间 {} - {} 内",
                date,
                time.format("%H:%M"),
                bounds.min_time().format("%H:%M"),
                bounds.max_time().format("%H:%M"),
            )));
        }

        self.selected_time = Some(time);
        Ok(())
    }

    /// 清空选择（幂等）
    pub fn reset(&mut self) {
        self.selected_date = None;
        self.selected_time = None;
    }

    /// 取件上下文变化：重算窗口并清空选择
    ///
    /// 新窗口整体替换旧窗口，不与旧的可选日期合并
    pub fn recompute_for_new_pickup(&mut self, pickup: PickupContext) -> &ClaimWindow {
        self.reset();
        let window = self.calculator.compute(&pickup);
        self.window.insert(window)
    }

    fn bounds_for(&self, date: NaiveDate) -> SchedulingResult<&DayBounds> {
        let window = self
            .window
            .as_ref()
            .ok_or_else(|| SchedulingError::invalid_selection("尚未确定取件时间，无可自取日期"))?;

        window.day_bounds(date).ok_or_else(|| {
            tracing::debug!(%date, "自取日期不在窗口内");
            SchedulingError::invalid_selection(format!("{} 不在可自取日期内", date))
        })
    }
}
