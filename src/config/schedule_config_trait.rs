// ==========================================
// 洗衣预约系统 - 排期配置读取 Trait
// ==========================================
// 职责: 定义构造 ShopSchedule 所需的配置读取接口（不包含实现）
// 实现者: ConfigManager（从 config_kv 表读取）、测试中的 Mock
// ==========================================

use crate::config::error::ConfigResult;
use crate::domain::shop::ShopSchedule;

// ==========================================
// ScheduleConfigReader Trait
// ==========================================
pub trait ScheduleConfigReader: Send + Sync {
    // ===== 营业时间 =====

    /// 开门小时（默认 6）
    fn get_open_hour(&self) -> ConfigResult<u32>;

    /// 关门小时（默认 17）
    fn get_close_hour(&self) -> ConfigResult<u32>;

    /// 休息日，周日起算索引 0-6（默认 0 = 周日）
    fn get_closed_weekday_index(&self) -> ConfigResult<u32>;

    // ===== 加工时长 =====

    /// 加急单加工小时（默认 4）
    fn get_rush_offset_hours(&self) -> ConfigResult<u32>;

    /// 普通单加工小时（默认 60）
    fn get_normal_offset_hours(&self) -> ConfigResult<u32>;

    /// 就绪后保管小时（默认不限）
    fn get_claim_hold_hours(&self) -> ConfigResult<Option<u32>>;

    // ===== 时段粒度 =====

    /// 自取时段分钟数（默认 60）
    fn get_claim_slot_minutes(&self) -> ConfigResult<u32>;

    /// 取件时段分钟数（默认 60）
    fn get_pickup_slot_minutes(&self) -> ConfigResult<u32>;

    /// 读取全部配置并构造经过校验的 ShopSchedule
    fn load_shop_schedule(&self) -> ConfigResult<ShopSchedule> {
        ShopSchedule::builder()
            .hours(self.get_open_hour()?, self.get_close_hour()?)
            .closed_weekday_index(self.get_closed_weekday_index()?)
            .rush_offset_hours(self.get_rush_offset_hours()?)
            .normal_offset_hours(self.get_normal_offset_hours()?)
            .claim_hold_hours(self.get_claim_hold_hours()?)
            .claim_slot_minutes(self.get_claim_slot_minutes()?)
            .pickup_slot_minutes(self.get_pickup_slot_minutes()?)
            .build()
    }
}
