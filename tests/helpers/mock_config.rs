// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use laundry_claim::config::{ConfigError, ConfigResult, ScheduleConfigReader};

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub open_hour: u32,
    pub close_hour: u32,
    pub closed_weekday_index: u32,
    pub rush_offset_hours: u32,
    pub normal_offset_hours: u32,
    pub claim_hold_hours: Option<u32>,
    pub claim_slot_minutes: u32,
    pub pickup_slot_minutes: u32,
    /// 模拟存储中存在格式错误的开门时间
    pub broken_open_hour: Option<String>,
}

impl MockConfig {
    /// 创建默认配置（06:00-17:00，周日休息）
    pub fn default() -> Self {
        Self {
            open_hour: 6,
            close_hour: 17,
            closed_weekday_index: 0,
            rush_offset_hours: 4,
            normal_offset_hours: 60,
            claim_hold_hours: None,
            claim_slot_minutes: 60,
            pickup_slot_minutes: 60,
            broken_open_hour: None,
        }
    }

    /// 周三休息
    pub fn closed_on_wednesday() -> Self {
        let mut config = Self::default();
        config.closed_weekday_index = 3;
        config
    }

    /// 营业时间 08:00-20:00
    pub fn long_hours() -> Self {
        let mut config = Self::default();
        config.open_hour = 8;
        config.close_hour = 20;
        config
    }

    pub fn with_hold_hours(hours: u32) -> Self {
        let mut config = Self::default();
        config.claim_hold_hours = Some(hours);
        config
    }
}

impl ScheduleConfigReader for MockConfig {
    fn get_open_hour(&self) -> ConfigResult<u32> {
        match &self.broken_open_hour {
            Some(raw) => Err(ConfigError::ParseError {
                key: "shop_open_hour".to_string(),
                value: raw.clone(),
            }),
            None => Ok(self.open_hour),
        }
    }

    fn get_close_hour(&self) -> ConfigResult<u32> {
        Ok(self.close_hour)
    }

    fn get_closed_weekday_index(&self) -> ConfigResult<u32> {
        Ok(self.closed_weekday_index)
    }

    fn get_rush_offset_hours(&self) -> ConfigResult<u32> {
        Ok(self.rush_offset_hours)
    }

    fn get_normal_offset_hours(&self) -> ConfigResult<u32> {
        Ok(self.normal_offset_hours)
    }

    fn get_claim_hold_hours(&self) -> ConfigResult<Option<u32>> {
        Ok(self.claim_hold_hours)
    }

    fn get_claim_slot_minutes(&self) -> ConfigResult<u32> {
        Ok(self.claim_slot_minutes)
    }

    fn get_pickup_slot_minutes(&self) -> ConfigResult<u32> {
        Ok(self.pickup_slot_minutes)
    }
}
