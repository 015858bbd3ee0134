//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payment
//! configuration from YAML.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::calculation::{MAX_CYCLE_START_DAY, current_salary_cycle};
use crate::error::{EngineError, EngineResult};
use crate::models::{PaymentConfig, SalaryCycle};

/// Name of the payment configuration file inside a configuration directory.
pub const PAYMENT_CONFIG_FILE: &str = "payment.yaml";

/// Loads and provides access to the payment configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── payment.yaml   # Cycle, working-day, overtime, deduction, allowance
///                    # and bonus settings
/// ```
///
/// Fields missing from the file take their built-in defaults.
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
/// let cycle = loader.current_cycle(today).unwrap();
/// println!("Current cycle: {}", cycle);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PaymentConfig,
}

impl ConfigLoader {
    /// Loads `payment.yaml` from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - The cycle start day is outside 1 to 28
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::from_file(path.as_ref().join(PAYMENT_CONFIG_FILE))
    }

    /// Loads a payment configuration from a single YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<PaymentConfig>(path)?;

        if !(1..=MAX_CYCLE_START_DAY).contains(&config.cycle_start_day) {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "cycle_start_day {} must be between 1 and {}",
                    config.cycle_start_day, MAX_CYCLE_START_DAY
                ),
            });
        }

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PaymentConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the payment configuration.
    pub fn payment_config(&self) -> &PaymentConfig {
        &self.config
    }

    /// The cycle containing `today` for the configured start day.
    pub fn current_cycle(&self, today: NaiveDate) -> EngineResult<SalaryCycle> {
        current_salary_cycle(self.config.cycle_start_day, today)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(PaymentConfig::default())
    }
}
