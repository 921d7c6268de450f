// ==========================================
// 洗衣预约系统 - 命令行入口
// ==========================================
// 子命令: window / calendar / slots / pickup-slots / config
// 输出: stdout 打印 JSON，日志写 stderr
// ==========================================

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use laundry_claim::api::{ApiError, BookingScheduleApi};
use laundry_claim::config::{config_keys, ConfigManager, ScheduleConfigReader};
use laundry_claim::db::{get_default_db_path, DB_PATH_ENV};
use laundry_claim::{i18n, logging, BookingType, ShopSchedule};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "laundry-claim")]
#[command(about = "洗衣预约系统 - 自取排期", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置数据库路径（未指定时使用内置默认门店规则）
    #[arg(long, global = true, env = DB_PATH_ENV)]
    db: Option<String>,

    /// 输出语言（zh-CN / en）
    #[arg(long, global = true, default_value = "zh-CN")]
    lang: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 计算自取窗口
    Window {
        #[command(flatten)]
        pickup: PickupArgs,
    },

    /// 自取日历（6 行 × 7 列，周日起）
    Calendar {
        #[command(flatten)]
        pickup: PickupArgs,

        /// 显示月份（YYYY-MM），默认为首个可自取日所在月
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,

        /// 今天（YYYY-MM-DD），默认取本地日期
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// 某个自取日期的时段
    Slots {
        #[command(flatten)]
        pickup: PickupArgs,

        /// 自取日期（YYYY-MM-DD）
        #[arg(long)]
        claim_date: NaiveDate,

        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// 某个取件日期的可选时段
    PickupSlots {
        /// 取件日期（YYYY-MM-DD）
        #[arg(long)]
        date: NaiveDate,

        /// 当前时刻（YYYY-MM-DDTHH:MM:SS），默认取本地时间
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },

    /// 门店规则配置
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
struct PickupArgs {
    /// 取件日期（YYYY-MM-DD）
    #[arg(long)]
    date: NaiveDate,

    /// 取件时段开始（HH:MM）
    #[arg(long, value_parser = parse_time)]
    slot: NaiveTime,

    /// 预约类型（normal / rush）
    #[arg(long = "type", default_value = "normal", value_parser = parse_booking_type)]
    booking_type: BookingType,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// 显示当前生效的门店规则
    Show,

    /// 写入配置项（写入后校验，失败则回滚）
    Set { key: String, value: String },

    /// 删除配置项，恢复默认值
    Reset { key: String },
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| format!("时间格式应为 HH:MM: {}", e))
}

fn parse_month(raw: &str) -> Result<(i32, u32), String> {
    let (y, m) = raw
        .split_once('-')
        .ok_or_else(|| format!("月份格式应为 YYYY-MM: {}", raw))?;
    let year = y.parse::<i32>().map_err(|e| e.to_string())?;
    let month = m.parse::<u32>().map_err(|e| e.to_string())?;
    if !(1..=12).contains(&month) {
        return Err(format!("月份超出范围: {}", month));
    }
    Ok((year, month))
}

fn parse_booking_type(raw: &str) -> Result<BookingType, String> {
    raw.parse::<BookingType>()
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    i18n::set_locale(&cli.lang);

    tracing::debug!(version = laundry_claim::VERSION, "{}", laundry_claim::APP_NAME);

    match cli.command {
        Commands::Config(cmd) => {
            let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
            run_config(&db_path, cmd)
        }
        cmd => {
            let schedule = load_schedule(cli.db.as_deref())?;
            run_schedule(schedule, cmd)
        }
    }
}

fn load_schedule(db: Option<&str>) -> Result<ShopSchedule> {
    match db {
        None => Ok(ShopSchedule::default()),
        Some(path) => {
            let manager = ConfigManager::new(path)
                .with_context(|| format!("无法打开配置数据库: {}", path))?;
            Ok(manager.load_shop_schedule()?)
        }
    }
}

fn run_schedule(schedule: ShopSchedule, cmd: Commands) -> Result<()> {
    let mut api = BookingScheduleApi::new(schedule);

    match cmd {
        Commands::Window { pickup } => {
            let view = set_pickup(&mut api, &pickup)?;
            print_json(&view)
        }
        Commands::Calendar { pickup, month, today } => {
            let view = set_pickup(&mut api, &pickup)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let (year, month) = match month {
                Some(m) => m,
                None => {
                    let first = view.days.first().map(|d| d.date).unwrap_or(today);
                    (first.year(), first.month())
                }
            };
            let cells = api.claim_calendar(year, month, today).map_err(api_error)?;
            print_json(&cells)
        }
        Commands::Slots { pickup, claim_date, today } => {
            set_pickup(&mut api, &pickup)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let slots = api.claim_slots(claim_date, today).map_err(api_error)?;
            print_json(&slots)
        }
        Commands::PickupSlots { date, now } => {
            let now = now.unwrap_or_else(|| Local::now().naive_local());
            print_json(&api.pickup_slots(date, now))
        }
        Commands::Config(_) => Err(anyhow!("配置子命令不使用排期上下文")),
    }
}

fn set_pickup(
    api: &mut BookingScheduleApi,
    pickup: &PickupArgs,
) -> Result<laundry_claim::api::ClaimWindowView> {
    api.set_pickup(Some(pickup.date), Some(pickup.slot), pickup.booking_type)
        .map_err(api_error)
}

fn run_config(db_path: &str, cmd: ConfigCommands) -> Result<()> {
    let manager =
        ConfigManager::new(db_path).with_context(|| format!("无法打开配置数据库: {}", db_path))?;

    match cmd {
        ConfigCommands::Show => {
            let schedule = manager.load_shop_schedule()?;
            print_json(&schedule)
        }
        ConfigCommands::Set { key, value } => {
            let schedule = manager
                .set_schedule_value(&key, &value)
                .map_err(|e| api_error(e.into()))?;
            print_json(&schedule)
        }
        ConfigCommands::Reset { key } => {
            ensure_known_key(&key)?;
            manager.remove_global_config_value(&key)?;
            print_json(&manager.load_shop_schedule()?)
        }
    }
}

fn ensure_known_key(key: &str) -> Result<()> {
    if config_keys::ALL.contains(&key) {
        Ok(())
    } else {
        Err(anyhow!(
            "未知配置项: {}（可用: {}）",
            key,
            config_keys::ALL.join(", ")
        ))
    }
}

/// 错误以 ErrorResponse JSON 形式输出（错误码 + 本地化文案）
fn api_error(err: ApiError) -> anyhow::Error {
    let response = err.to_response();
    match serde_json::to_string(&response) {
        Ok(body) => anyhow!(body),
        Err(_) => anyhow!("[{}] {}", response.code, response.message),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
