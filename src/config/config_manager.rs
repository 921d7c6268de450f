// ==========================================
// 洗衣预约系统 - 配置管理器
// ==========================================
// 职责: 门店排期配置的加载、查询、写入、快照
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================
// 说明: 配置缺失使用默认值；配置存在但格式错误直接报错，不静默回退
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schedule_config_trait::ScheduleConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::shop::{
    ShopSchedule, DEFAULT_CLAIM_SLOT_MINUTES, DEFAULT_CLOSED_WEEKDAY, DEFAULT_CLOSE_HOUR,
    DEFAULT_NORMAL_OFFSET_HOURS, DEFAULT_OPEN_HOUR, DEFAULT_PICKUP_SLOT_MINUTES,
    DEFAULT_RUSH_OFFSET_HOURS,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 全局作用域
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_schema()?;
        Ok(manager)
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        let manager = Self { conn };
        manager.ensure_schema()?;
        Ok(manager)
    }

    fn lock(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 创建 config_kv 表（幂等）
    pub fn ensure_schema(&self) -> ConfigResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 原始读写
    // ==========================================

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 删除 global scope 的配置（恢复默认值）
    pub fn remove_global_config_value(&self, key: &str) -> ConfigResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
        )?;
        Ok(affected > 0)
    }

    /// 写入门店规则配置项并立即校验（失败时回滚为原值）
    ///
    /// # 返回
    /// - Ok(ShopSchedule): 写入后生效的门店规则
    /// - Err: 未知配置项，或写入后规则校验失败（存储已恢复）
    pub fn set_schedule_value(&self, key: &str, value: &str) -> ConfigResult<ShopSchedule> {
        if !config_keys::ALL.contains(&key) {
            return Err(ConfigError::invalid(key, value, "未知配置项"));
        }

        let previous = self.get_global_config_value(key)?;
        self.set_global_config_value(key, value)?;

        match self.load_shop_schedule() {
            Ok(schedule) => Ok(schedule),
            Err(e) => {
                match previous {
                    Some(old) => self.set_global_config_value(key, &old)?,
                    None => {
                        self.remove_global_config_value(key)?;
                    }
                }
                tracing::warn!(config_key = key, value, error = %e, "配置校验失败，已回滚");
                Err(e)
            }
        }
    }

    fn get_u32_or_default(&self, key: &str, default: u32) -> ConfigResult<u32> {
        match self.get_global_config_value(key)? {
            None => Ok(default),
            Some(raw) => parse_u32(key, &raw),
        }
    }

    // ==========================================
    // 快照
    // ==========================================

    /// 获取所有 global 配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key",
        )?;

        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 从配置快照恢复配置（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
                params![GLOBAL_SCOPE, key, value],
            )?;
        }

        tx.commit()?;
        tracing::info!(count, "配置快照已恢复");
        Ok(count)
    }
}

fn parse_u32(key: &str, raw: &str) -> ConfigResult<u32> {
    raw.trim().parse::<u32>().map_err(|_| ConfigError::ParseError {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

// ==========================================
// ScheduleConfigReader Trait 实现
// ==========================================
impl ScheduleConfigReader for ConfigManager {
    fn get_open_hour(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::SHOP_OPEN_HOUR, DEFAULT_OPEN_HOUR)
    }

    fn get_close_hour(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::SHOP_CLOSE_HOUR, DEFAULT_CLOSE_HOUR)
    }

    fn get_closed_weekday_index(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::SHOP_CLOSED_WEEKDAY, DEFAULT_CLOSED_WEEKDAY)
    }

    fn get_rush_offset_hours(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::RUSH_OFFSET_HOURS, DEFAULT_RUSH_OFFSET_HOURS)
    }

    fn get_normal_offset_hours(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::NORMAL_OFFSET_HOURS, DEFAULT_NORMAL_OFFSET_HOURS)
    }

    fn get_claim_hold_hours(&self) -> ConfigResult<Option<u32>> {
        match self.get_global_config_value(config_keys::CLAIM_HOLD_HOURS)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_u32(config_keys::CLAIM_HOLD_HOURS, &raw).map(Some),
        }
    }

    fn get_claim_slot_minutes(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::CLAIM_SLOT_MINUTES, DEFAULT_CLAIM_SLOT_MINUTES)
    }

    fn get_pickup_slot_minutes(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::PICKUP_SLOT_MINUTES, DEFAULT_PICKUP_SLOT_MINUTES)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 营业时间
    pub const SHOP_OPEN_HOUR: &str = "shop_open_hour";
    pub const SHOP_CLOSE_HOUR: &str = "shop_close_hour";
    pub const SHOP_CLOSED_WEEKDAY: &str = "shop_closed_weekday"; // 0 = 周日

    // 加工时长
    pub const RUSH_OFFSET_HOURS: &str = "rush_offset_hours";
    pub const NORMAL_OFFSET_HOURS: &str = "normal_offset_hours";
    pub const CLAIM_HOLD_HOURS: &str = "claim_hold_hours";

    // 时段粒度
    pub const CLAIM_SLOT_MINUTES: &str = "claim_slot_minutes";
    pub const PICKUP_SLOT_MINUTES: &str = "pickup_slot_minutes";

    pub const ALL: &[&str] = &[
        SHOP_OPEN_HOUR,
        SHOP_CLOSE_HOUR,
        SHOP_CLOSED_WEEKDAY,
        RUSH_OFFSET_HOURS,
        NORMAL_OFFSET_HOURS,
        CLAIM_HOLD_HOURS,
        CLAIM_SLOT_MINUTES,
        PICKUP_SLOT_MINUTES,
    ];
}
