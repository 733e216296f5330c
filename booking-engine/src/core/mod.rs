//! 核心模块 - 配置和错误定义
//!
//! # 模块结构
//!
//! - [`Config`] - 引擎配置
//! - [`BookingError`] - 定价/状态错误

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{BookingError, Result};
