use crate::pricing::{DiscountCap, DiscountPolicy, RateTable};
use crate::reconciler::ReconcileContext;
use shared::booking::BookingStatus;
use shared::error::{AppError, AppResult};
use shared::models::{DiscountMode, RatePlan, Role};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default per-plan caps (₹ per plate) in fixed-amount mode
const DEFAULT_FIXED_CAPS: &[(RatePlan, f64)] = &[
    (RatePlan::Silver, 100.0),
    (RatePlan::Gold, 150.0),
    (RatePlan::Platinum, 200.0),
    (RatePlan::Diamond, 250.0),
];

/// 引擎配置 - 定价与状态规则
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录，设置后按天滚动写文件 |
/// | RATE_TABLE_PATH | - | JSON 价格表，替换内置价格 |
/// | DISCOUNT_MODE | percentage | percentage \| fixed |
/// | DISCOUNT_CAP_PERCENT | 10 | 非管理员折扣上限 (percentage 模式) |
/// | DISCOUNT_CAP_SILVER .. DISCOUNT_CAP_DIAMOND | 100/150/200/250 | 各套餐折扣上限 (fixed 模式) |
/// | DISCOUNT_CAP_DEFAULT | 100 | 未选套餐时的上限 (fixed 模式) |
/// | FALLBACK_STATUS | enquiry | 无定金时的默认状态: enquiry \| tentative |
/// | MANUAL_STATUS_REQUIRES_ADMIN | false | 手动改状态是否需要管理员 |
///
/// # 示例
///
/// ```ignore
/// DISCOUNT_MODE=fixed DISCOUNT_CAP_GOLD=200 booking-engine booking.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// `None` uses the built-in rate table
    pub rate_table_path: Option<PathBuf>,
    pub discount: DiscountPolicy,
    /// Status of a booking with no advance and no manual choice
    pub fallback_status: BookingStatus,
    pub manual_status_requires_admin: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (environment, test map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed_f64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());
        let parsed_bool = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| v.trim().parse::<bool>().ok())
                .unwrap_or(default)
        };

        let mode = match lookup("DISCOUNT_MODE")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("fixed") | Some("fixed_amount") => DiscountMode::FixedAmount,
            Some("percentage") | None => DiscountMode::Percentage,
            Some(other) => {
                tracing::warn!(value = other, "Unknown DISCOUNT_MODE, using percentage");
                DiscountMode::Percentage
            }
        };

        let staff_cap = match mode {
            DiscountMode::Percentage => {
                DiscountCap::Uniform(parsed_f64("DISCOUNT_CAP_PERCENT").unwrap_or(10.0))
            }
            DiscountMode::FixedAmount => {
                let caps: BTreeMap<RatePlan, f64> = DEFAULT_FIXED_CAPS
                    .iter()
                    .map(|&(plan, default)| {
                        let key = format!("DISCOUNT_CAP_{}", plan.as_str().to_ascii_uppercase());
                        (plan, parsed_f64(&key).unwrap_or(default))
                    })
                    .collect();
                DiscountCap::PerPlan {
                    caps,
                    fallback: parsed_f64("DISCOUNT_CAP_DEFAULT").unwrap_or(100.0),
                }
            }
        };

        let fallback_status = match lookup("FALLBACK_STATUS")
            .map(|v| v.parse::<BookingStatus>())
        {
            None => BookingStatus::Enquiry,
            Some(Ok(status @ (BookingStatus::Enquiry | BookingStatus::Tentative))) => status,
            Some(Ok(status)) => {
                tracing::warn!(%status, "FALLBACK_STATUS must be enquiry or tentative");
                BookingStatus::Enquiry
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Invalid FALLBACK_STATUS");
                BookingStatus::Enquiry
            }
        };

        Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parsed_bool("LOG_JSON", false),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
            rate_table_path: lookup("RATE_TABLE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            discount: DiscountPolicy { mode, staff_cap },
            fallback_status,
            manual_status_requires_admin: parsed_bool("MANUAL_STATUS_REQUIRES_ADMIN", false),
        }
    }

    /// Build the reconciler context for a user role
    ///
    /// Loads the rate table file when one is configured; a table that cannot
    /// be read or parsed is a `ConfigError`.
    pub fn reconcile_context(&self, role: Role) -> AppResult<ReconcileContext> {
        let rates = match &self.rate_table_path {
            Some(path) => RateTable::load(path).map_err(|e| {
                AppError::config(format!("{e:#}"))
                    .with_detail("path", path.display().to_string())
            })?,
            None => RateTable::default(),
        };

        Ok(ReconcileContext {
            rates,
            discount: self.discount.clone(),
            role,
            fallback_status: self.fallback_status,
            manual_status_requires_admin: self.manual_status_requires_admin,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
