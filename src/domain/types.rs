// ==========================================
// 洗衣预约系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 预约类型 (Booking Type)
// ==========================================
// 决定加工时长与自取窗口天数
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    Normal, // 普通单
    Rush,   // 加急单
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingType::Normal => write!(f, "NORMAL"),
            BookingType::Rush => write!(f, "RUSH"),
        }
    }
}

impl std::str::FromStr for BookingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "standard" => Ok(BookingType::Normal),
            "rush" | "express" => Ok(BookingType::Rush),
            other => Err(format!("未知预约类型: {}", other)),
        }
    }
}

impl BookingType {
    /// 自取窗口总天数（含首日）
    ///
    /// - 加急: 2 天
    /// - 普通: 3 天
    pub fn claim_day_count(&self) -> usize {
        match self {
            BookingType::Normal => 3,
            BookingType::Rush => 2,
        }
    }

    /// 配送预估（仅用于配送展示，与自取就绪时间无关）
    pub fn delivery_estimate(&self) -> DeliveryEstimate {
        match self {
            BookingType::Normal => DeliveryEstimate {
                min_hours: 48,
                max_hours: 72,
            },
            BookingType::Rush => DeliveryEstimate {
                min_hours: 36,
                max_hours: 36,
            },
        }
    }

    /// 显示名称的 i18n key
    pub fn label_key(&self) -> &'static str {
        match self {
            BookingType::Normal => "booking_type.normal",
            BookingType::Rush => "booking_type.rush",
        }
    }
}

// ==========================================
// 配送预估 (Delivery Estimate)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub min_hours: u32,
    pub max_hours: u32,
}

impl DeliveryEstimate {
    /// 是否为固定时长（min == max）
    pub fn is_fixed(&self) -> bool {
        self.min_hours == self.max_hours
    }

    /// 以天为单位的展示文本，例如 "1.5" 或 "2-3"
    pub fn days_text(&self) -> String {
        let fmt_days = |hours: u32| {
            let days = hours as f64 / 24.0;
            if days.fract() == 0.0 {
                format!("{}", days as u32)
            } else {
                format!("{:.1}", days)
            }
        };
        if self.is_fixed() {
            fmt_days(self.min_hours)
        } else {
            format!("{}-{}", fmt_days(self.min_hours), fmt_days(self.max_hours))
        }
    }
}

// ==========================================
// 自取选择阶段 (Selection Phase)
// ==========================================
// Unset → DateOnly → Complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionPhase {
    Unset,    // 未选择
    DateOnly, // 已选日期
    Complete, // 日期 + 时间均已选
}

impl fmt::Display for SelectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPhase::Unset => write!(f, "UNSET"),
            SelectionPhase::DateOnly => write!(f, "DATE_ONLY"),
            SelectionPhase::Complete => write!(f, "COMPLETE"),
        }
    }
}
