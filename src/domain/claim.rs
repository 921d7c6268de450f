// ==========================================
// 洗衣预约系统 - 自取窗口领域模型
// ==========================================
// 职责: 自取窗口（可选日期 + 每日时间边界）、自取摘要、自取凭单
// 红线: ClaimWindow 为纯计算结果，只随 PickupContext 整体重算
// ==========================================

use crate::domain::pickup::PickupContext;
use crate::domain::types::BookingType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// DayBounds - 单日自取时间边界
// ==========================================
// 不变量: min ≤ max，且两者都落在 date 当天
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBounds {
    pub date: NaiveDate,
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DayBounds {
    pub fn min_time(&self) -> NaiveTime {
        self.min.time()
    }

    pub fn max_time(&self) -> NaiveTime {
        self.max.time()
    }

    /// 闭区间包含判断 [min, max]
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.min <= moment && moment <= self.max
    }

    pub fn contains_time(&self, time: NaiveTime) -> bool {
        self.contains(self.date.and_time(time))
    }
}

// ==========================================
// ClaimWindow - 自取窗口
// ==========================================
// 只由 ClaimWindowCalculator 产生；不支持反序列化，days 的有序性不可绕过
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimWindow {
    pub pickup: PickupContext,
    pub readiness_moment: NaiveDateTime,
    /// 就绪 + 保管时长（未配置保管时长时为 None）
    pub end_moment: Option<NaiveDateTime>,
    /// 按日期升序，无重复
    pub days: Vec<DayBounds>,

    // ===== 计算时的门店规则快照 =====
    pub closed_weekday: Weekday,
    pub shop_open: NaiveTime,
    pub shop_close: NaiveTime,
}

impl ClaimWindow {
    pub fn booking_type(&self) -> BookingType {
        self.pickup.booking_type
    }

    pub fn allowed_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|d| d.date)
    }

    pub fn allowed_date_list(&self) -> Vec<NaiveDate> {
        self.allowed_dates().collect()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.day_bounds(date).is_some()
    }

    pub fn day_bounds(&self, date: NaiveDate) -> Option<&DayBounds> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|idx| &self.days[idx])
    }

    pub fn first_day(&self) -> Option<&DayBounds> {
        self.days.first()
    }

    pub fn last_day(&self) -> Option<&DayBounds> {
        self.days.last()
    }
}

// ==========================================
// ClaimSummary - 自取摘要
// ==========================================
// 供收据与表单校验组件读取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub booking_type: BookingType,
    pub pickup_moment: NaiveDateTime,
    pub readiness_moment: NaiveDateTime,
    pub claim_date: NaiveDate,
    pub claim_time: NaiveTime,
}

impl ClaimSummary {
    pub fn claim_moment(&self) -> NaiveDateTime {
        self.claim_date.and_time(self.claim_time)
    }
}

// ==========================================
// ClaimTicket - 自取凭单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimTicket {
    pub ticket_id: Uuid,
    pub summary: ClaimSummary,
    pub issued_at: NaiveDateTime,
}

impl ClaimTicket {
    pub fn issue(summary: ClaimSummary, issued_at: NaiveDateTime) -> Self {
        Self {
            ticket_id: Uuid::new_v4(),
            summary,
            issued_at,
        }
    }

    /// 收据上展示的短编号（UUID 前 8 位，大写）
    pub fn short_code(&self) -> String {
        self.ticket_id.simple().to_string()[..8].to_uppercase()
    }
}
