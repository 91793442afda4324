use std::{fs, path::Path};

use crate::config::{Config, ConfigError, ExceptionMode};

/// Command-line values that take precedence over the loaded document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgOverrides {
    pub exception_mode: Option<ExceptionMode>,
    pub plain: bool,
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: &ArgOverrides) {
        if let Some(mode) = overrides.exception_mode {
            self.exception_mode = mode;
        }
        if overrides.plain {
            self.plain = true;
        }
    }
}

/// Reads and validates the configuration document at `path`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path)?;
    let config = Config::from_json_str(&data)?;
    tracing::debug!(
        path = %path.display(),
        income_plans = config.plans.income.len(),
        expense_plans = config.plans.expenses.len(),
        "loaded forecast configuration"
    );
    Ok(config)
}
