//! Configuration for the Payslip Engine.
//!
//! This module provides the baseline configuration factories and the loader
//! that reads a [`PaymentConfig`](crate::models::PaymentConfig) from YAML.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Cycles start on day {}", loader.payment_config().cycle_start_day);
//! ```

mod defaults;
mod loader;

pub use defaults::{
    DEFAULT_CURRENCY, DEFAULT_HOURS_PER_DAY, DEFAULT_LOCALE, default_allowance_config,
    default_bonus_config, default_deduction_config, default_leave_config,
    default_overtime_rules, default_payment_config, five_day_week, six_day_week,
};
pub use loader::{ConfigLoader, PAYMENT_CONFIG_FILE};
