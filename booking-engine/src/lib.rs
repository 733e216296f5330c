//! Booking Engine - 宴会预订定价与账目对账
//!
//! # 架构概述
//!
//! Keeps the derived fields of a banquet booking consistent with its inputs:
//!
//! - **定价** (`pricing`): rate table, role-based discount caps, rate per plate, total
//! - **定金** (`ledger`): advance payment rows and balance
//! - **状态** (`status`): status derivation and the append-only history
//! - **对账** (`reconciler`): the recompute pass and the form edit handlers
//!
//! # 模块结构
//!
//! ```text
//! booking-engine/src/
//! ├── cli.rs         # 命令行入口
//! ├── core/          # 配置、错误
//! ├── pricing/       # 价格表、折扣、单价计算
//! ├── ledger/        # 定金
//! ├── status/        # 状态与历史
//! ├── reconciler/    # recompute + 表单处理
//! ├── money.rs       # Decimal 金额工具
//! └── utils/         # 日志
//! ```

pub mod cli;
pub mod core;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod reconciler;
pub mod status;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{BookingError, Config};
pub use pricing::{DiscountCap, DiscountPolicy, RateTable};
pub use reconciler::{BookingReconciler, FieldChange, ReconcileContext, recompute};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

pub fn print_banner() {
    eprintln!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    Banquet Booking Engine v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
