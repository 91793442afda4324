use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de::Deserializer, Deserialize};

use crate::{config::ConfigError, ledger::TransactionKind};

/// Date format accepted for planned entries.
pub const PLAN_DATE_FORMAT: &str = "%Y-%m-%d";

/// How transactions carrying an exception tag are treated.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionMode {
    /// Kept in the ledger but left out of historical averages.
    #[default]
    Ignore,
    /// Dropped from the ledger entirely.
    Hide,
    None,
}

impl FromStr for ExceptionMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(ExceptionMode::Ignore),
            "hide" => Ok(ExceptionMode::Hide),
            "none" => Ok(ExceptionMode::None),
            other => Err(ConfigError::UnknownExceptionMode(other.to_string())),
        }
    }
}

impl fmt::Display for ExceptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExceptionMode::Ignore => "ignore",
            ExceptionMode::Hide => "hide",
            ExceptionMode::None => "none",
        };
        f.write_str(label)
    }
}

/// A tag listed under `exceptions`, with an optional per-tag mode.
///
/// Older documents list bare tag strings; those deserialize with no mode and
/// defer to [`Config::exception_mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRule {
    pub tag: String,
    pub mode: Option<ExceptionMode>,
}

impl ExceptionRule {
    pub fn new(tag: impl Into<String>, mode: Option<ExceptionMode>) -> Self {
        Self {
            tag: tag.into(),
            mode,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExceptionRule {
    Tag(String),
    Rule {
        tag: String,
        #[serde(default)]
        mode: Option<ExceptionMode>,
    },
}

impl<'de> Deserialize<'de> for ExceptionRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawExceptionRule::deserialize(deserializer)? {
            RawExceptionRule::Tag(tag) => ExceptionRule::new(tag, None),
            RawExceptionRule::Rule { tag, mode } => ExceptionRule::new(tag, mode),
        })
    }
}

/// A dated entry expected to recur in the same calendar month every year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlannedEntry {
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub value: f64,
    pub date: String,
}

impl PlannedEntry {
    pub fn new<I, S>(tags: I, value: f64, date: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            value,
            date: date.into(),
        }
    }

    /// Calendar month (1-12) of the entry's date; the year is irrelevant.
    pub fn month(&self, kind: TransactionKind) -> Result<u32, ConfigError> {
        NaiveDate::parse_from_str(self.date.trim(), PLAN_DATE_FORMAT)
            .map(|date| date.month())
            .map_err(|_| ConfigError::InvalidPlanDate {
                group: kind.group_name().to_string(),
                date: self.date.clone(),
            })
    }
}

/// A pair of values keyed by configuration group (`income` / `expenses`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Grouped<T> {
    #[serde(default)]
    pub income: T,
    #[serde(default)]
    pub expenses: T,
}

impl<T> Grouped<T> {
    pub fn get(&self, kind: TransactionKind) -> &T {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expenses,
        }
    }

    pub fn get_mut(&mut self, kind: TransactionKind) -> &mut T {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expenses,
        }
    }
}

/// Forecasting configuration, usually loaded from a JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plans: Grouped<Vec<PlannedEntry>>,
    #[serde(default)]
    pub exceptions: Grouped<Vec<ExceptionRule>>,
    #[serde(default)]
    pub exception_mode: ExceptionMode,
    /// Tags marking transfers from (income) or to (expenses) savings.
    #[serde(default)]
    pub savings: Grouped<Vec<String>>,
    #[serde(default)]
    pub min_balance: f64,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub expenses: Option<f64>,
    #[serde(default = "Config::default_factor")]
    pub income_factor: f64,
    #[serde(default = "Config::default_factor")]
    pub expenses_factor: f64,
    #[serde(default)]
    pub max_income: Option<f64>,
    #[serde(default)]
    pub min_expenses: Option<f64>,
    #[serde(default)]
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plans: Grouped::default(),
            exceptions: Grouped::default(),
            exception_mode: ExceptionMode::default(),
            savings: Grouped::default(),
            min_balance: 0.0,
            income: None,
            expenses: None,
            income_factor: Self::default_factor(),
            expenses_factor: Self::default_factor(),
            max_income: None,
            min_expenses: None,
            plain: false,
        }
    }
}

impl Config {
    pub fn default_factor() -> f64 {
        0.5
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks plan dates and numeric parameters so errors surface at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in TransactionKind::ALL {
            for entry in self.plans.get(kind) {
                entry.month(kind)?;
            }
        }

        let finite = [
            ("min_balance", Some(self.min_balance)),
            ("income", self.income),
            ("expenses", self.expenses),
            ("income_factor", Some(self.income_factor)),
            ("expenses_factor", Some(self.expenses_factor)),
            ("max_income", self.max_income),
            ("min_expenses", self.min_expenses),
        ];
        for (name, value) in finite {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        if let Some(value) = self.min_expenses.filter(|v| *v > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "min_expenses",
                value,
            });
        }
        Ok(())
    }

    /// Resolves a tag's mode: its own override, else the configured default.
    /// Tags not listed under the group's exceptions resolve to `None`.
    pub fn effective_mode(&self, tag: &str, kind: TransactionKind) -> ExceptionMode {
        self.exceptions
            .get(kind)
            .iter()
            .find(|rule| rule.tag == tag)
            .map(|rule| rule.mode.unwrap_or(self.exception_mode))
            .unwrap_or(ExceptionMode::None)
    }

    /// Listed tags whose own mode or the default mode is `ignore`.
    pub fn ignored_tags(&self, kind: TransactionKind) -> BTreeSet<String> {
        self.tags_with_mode(kind, ExceptionMode::Ignore)
    }

    /// Listed tags whose own mode or the default mode is `hide`.
    pub fn hidden_tags(&self, kind: TransactionKind) -> BTreeSet<String> {
        self.tags_with_mode(kind, ExceptionMode::Hide)
    }

    pub fn savings_tags(&self, kind: TransactionKind) -> BTreeSet<String> {
        self.savings.get(kind).iter().cloned().collect()
    }

    pub fn max_income(&self) -> f64 {
        self.max_income.unwrap_or(f64::INFINITY)
    }

    pub fn min_expenses(&self) -> f64 {
        self.min_expenses.unwrap_or(0.0)
    }

    // The default mode applies to every listed tag on top of its own override.
    fn tags_with_mode(&self, kind: TransactionKind, mode: ExceptionMode) -> BTreeSet<String> {
        self.exceptions
            .get(kind)
            .iter()
            .filter(|rule| {
                self.effective_mode(&rule.tag, kind) == mode || self.exception_mode == mode
            })
            .map(|rule| rule.tag.clone())
            .collect()
    }
}
