// ==========================================
// 洗衣预约系统 - 预约排期 API
// ==========================================
// 职责: UI 事件处理器调用的门面
// - 取件日历/时段
// - 设定取件（解析上下文 → 重算自取窗口）
// - 自取日历/时段、选择、重置
// - 提交就绪检查、生成自取凭单
// 红线: 取件上下文真正变化时才重算；重算必清空选择
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::schedule_config_trait::ScheduleConfigReader;
use crate::domain::claim::{ClaimTicket, ClaimWindow, DayBounds};
use crate::domain::error::SchedulingError;
use crate::domain::pickup::PickupContext;
use crate::domain::shop::ShopSchedule;
use crate::domain::types::{BookingType, SelectionPhase};
use crate::engine::availability::ClaimAvailabilityView;
use crate::engine::calendar::{CalendarCell, DisplayedMonth, TimeSlot};
use crate::engine::pickup_availability::PickupAvailabilityView;
use crate::engine::selection::ClaimSelectionState;
use crate::i18n;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::instrument;

// ==========================================
// DTO
// ==========================================

/// 自取窗口（UI 展示用）
#[derive(Debug, Clone, Serialize)]
pub struct ClaimWindowView {
    pub booking_type: BookingType,
    pub booking_label: String,
    pub pickup_moment: NaiveDateTime,
    pub readiness_moment: NaiveDateTime,
    pub end_moment: Option<NaiveDateTime>,
    pub days: Vec<DayBounds>,
    pub delivery_estimate: String,
}

impl ClaimWindowView {
    fn from_window(window: &ClaimWindow) -> Self {
        let booking_type = window.booking_type();
        Self {
            booking_type,
            booking_label: i18n::booking_type_label(booking_type),
            pickup_moment: window.pickup.pickup_moment,
            readiness_moment: window.readiness_moment,
            end_moment: window.end_moment,
            days: window.days.clone(),
            delivery_estimate: i18n::delivery_estimate_label(booking_type),
        }
    }
}

/// 当前选择快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub phase: SelectionPhase,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<NaiveTime>,
}

/// 表单提交就绪检查
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReadiness {
    pub pickup_resolved: bool,
    pub claim_date_selected: bool,
    pub claim_time_selected: bool,
    pub ready: bool,
    pub missing: Vec<String>,
}

// ==========================================
// BookingScheduleApi
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BookingScheduleApi {
    state: ClaimSelectionState,
}

impl BookingScheduleApi {
    pub fn new(schedule: ShopSchedule) -> Self {
        Self {
            state: ClaimSelectionState::new(schedule),
        }
    }

    /// 从配置读取门店规则
    pub fn from_config(reader: &dyn ScheduleConfigReader) -> ApiResult<Self> {
        let schedule = reader.load_shop_schedule()?;
        Ok(Self::new(schedule))
    }

    pub fn schedule(&self) -> &ShopSchedule {
        self.state.schedule()
    }

    pub fn state(&self) -> &ClaimSelectionState {
        &self.state
    }

    // ==========================================
    // 取件
    // ==========================================

    pub fn pickup_calendar(&self, year: i32, month: u32, now: NaiveDateTime) -> ApiResult<Vec<CalendarCell>> {
        let displayed = displayed_month(year, month)?;
        Ok(PickupAvailabilityView::new(self.schedule(), now, displayed).month_view())
    }

    pub fn pickup_slots(&self, date: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        PickupAvailabilityView::new(self.schedule(), now, DisplayedMonth::of(date)).time_slots(date)
    }

    /// 设定取件日期/时段/预约类型
    ///
    /// - 任一缺失 → PreconditionViolation
    /// - 与当前上下文相同 → 保留窗口与选择
    /// - 否则整体重算窗口并清空选择
    #[instrument(skip(self))]
    pub fn set_pickup(
        &mut self,
        pickup_date: Option<NaiveDate>,
        slot_start: Option<NaiveTime>,
        booking_type: BookingType,
    ) -> ApiResult<ClaimWindowView> {
        let pickup = PickupContext::resolve(pickup_date, slot_start, booking_type)?;

        if let Some(window) = self.state.window() {
            if window.pickup == pickup {
                tracing::debug!("取件上下文未变化，保留当前自取选择");
                return Ok(ClaimWindowView::from_window(window));
            }
        }

        let window = self.state.recompute_for_new_pickup(pickup);
        tracing::info!(
            pickup = %pickup.pickup_moment,
            booking_type = %booking_type,
            first_date = ?window.first_day().map(|d| d.date),
            "自取窗口已重算"
        );
        Ok(ClaimWindowView::from_window(window))
    }

    /// 同一取件时刻切换预约类型
    pub fn change_booking_type(&mut self, booking_type: BookingType) -> ApiResult<ClaimWindowView> {
        let current = self.state.pickup().copied().ok_or_else(|| {
            ApiError::from(SchedulingError::precondition("尚未设定取件时间，无法切换预约类型"))
        })?;
        self.set_pickup(
            Some(current.pickup_date()),
            Some(current.pickup_moment.time()),
            booking_type,
        )
    }

    // ==========================================
    // 自取
    // ==========================================

    pub fn claim_window(&self) -> ApiResult<&ClaimWindow> {
        self.state.window().ok_or_else(|| {
            ApiError::from(SchedulingError::precondition("尚未设定取件时间，无自取窗口"))
        })
    }

    pub fn claim_window_view(&self) -> ApiResult<ClaimWindowView> {
        Ok(ClaimWindowView::from_window(self.claim_window()?))
    }

    pub fn claim_calendar(&self, year: i32, month: u32, today: NaiveDate) -> ApiResult<Vec<CalendarCell>> {
        let displayed = displayed_month(year, month)?;
        let window = self.claim_window()?;
        Ok(ClaimAvailabilityView::new(window, today, displayed).month_view())
    }

    pub fn claim_slots(&self, date: NaiveDate, today: NaiveDate) -> ApiResult<Vec<TimeSlot>> {
        let window = self.claim_window()?;
        let view = ClaimAvailabilityView::new(window, today, DisplayedMonth::of(date));
        Ok(view.time_slots(date, self.schedule().claim_slot_minutes()))
    }

    pub fn select_claim_date(&mut self, date: NaiveDate) -> ApiResult<SelectionSnapshot> {
        self.state.select_date(date)?;
        Ok(self.selection())
    }

    pub fn select_claim_time(&mut self, time: NaiveTime) -> ApiResult<SelectionSnapshot> {
        self.state.select_time(time)?;
        Ok(self.selection())
    }

    pub fn reset_claim(&mut self) -> SelectionSnapshot {
        self.state.reset();
        self.selection()
    }

    pub fn selection(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            phase: self.state.phase(),
            selected_date: self.state.selected_date(),
            selected_time: self.state.selected_time(),
        }
    }

    // ==========================================
    // 提交
    // ==========================================

    pub fn submit_readiness(&self) -> SubmitReadiness {
        let pickup_resolved = self.state.window().is_some();
        let claim_date_selected = self.state.selected_date().is_some();
        let claim_time_selected = self.state.selected_time().is_some();

        let mut missing = Vec::new();
        if !pickup_resolved {
            missing.push("pickup".to_string());
        }
        if !claim_date_selected {
            missing.push("claim_date".to_string());
        }
        if !claim_time_selected {
            missing.push("claim_time".to_string());
        }

        SubmitReadiness {
            pickup_resolved,
            claim_date_selected,
            claim_time_selected,
            ready: missing.is_empty(),
            missing,
        }
    }

    /// 生成自取凭单（收据组件使用）
    pub fn confirm(&self, now: NaiveDateTime) -> ApiResult<ClaimTicket> {
        if self.state.window().is_none() {
            return Err(SchedulingError::precondition("尚未设定取件时间").into());
        }
        let summary = self
            .state
            .summary()
            .ok_or_else(|| ApiError::from(SchedulingError::invalid_selection("自取日期与时间未选择完整")))?;

        let ticket = ClaimTicket::issue(summary, now);
        tracing::info!(
            ticket = %ticket.ticket_id,
            code = %ticket.short_code(),
            claim = %ticket.summary.claim_moment(),
            "自取凭单已生成"
        );
        Ok(ticket)
    }
}

fn displayed_month(year: i32, month: u32) -> ApiResult<DisplayedMonth> {
    DisplayedMonth::new(year, month)
        .ok_or_else(|| ApiError::InvalidInput(format!("无效月份: {}-{}", year, month)))
}
