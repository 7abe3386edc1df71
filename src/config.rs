// ⚙️ Configuration - Defaults as Data
// Every constant the calculators and views need, loaded from an optional JSON file.

use crate::budget::BudgetLine;
use crate::savings::CompoundingFrequency;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for every target (error, warn, info, debug, trace, off)
    pub default: String,

    /// Per-module overrides, e.g. `calculator = "debug"`
    pub modules: BTreeMap<String, String>,

    /// Write logs here instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default: "warn".to_string(),
            modules: BTreeMap::new(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Completed calculations kept in the history log
    pub history_limit: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig { history_limit: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsDefaults {
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    pub compounding: CompoundingFrequency,
}

impl Default for SavingsDefaults {
    fn default() -> Self {
        SavingsDefaults {
            principal: 1000.0,
            monthly_contribution: 100.0,
            annual_rate_percent: 5.0,
            years: 10.0,
            compounding: CompoundingFrequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanDefaults {
    pub loan_amount: f64,
    pub annual_interest_rate_percent: f64,
    pub term_years: f64,
    pub down_payment_percent: f64,
    pub processing_fee_percent: f64,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        LoanDefaults {
            loan_amount: 200_000.0,
            annual_interest_rate_percent: 7.5,
            term_years: 20.0,
            down_payment_percent: 20.0,
            processing_fee_percent: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitDefaults {
    pub number_of_people: u32,
    pub tip_percent: f64,
    pub tax_percent: f64,
    pub round_up: bool,
}

impl Default for SplitDefaults {
    fn default() -> Self {
        SplitDefaults {
            number_of_people: 2,
            tip_percent: 15.0,
            tax_percent: 8.0,
            round_up: false,
        }
    }
}

// ============================================================================
// APP CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub calculator: CalculatorConfig,
    pub savings: SavingsDefaults,
    pub loan: LoanDefaults,
    pub split: SplitDefaults,

    /// Months shown in the first-year savings projection
    pub projection_months: u32,

    /// Periods shown in the amortization breakdown
    pub schedule_periods: u32,

    /// Most rows a full amortization export will write
    pub export_period_limit: u32,

    pub categories: Vec<String>,
    pub budgets: Vec<BudgetLine>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            logging: LoggingConfig::default(),
            calculator: CalculatorConfig::default(),
            savings: SavingsDefaults::default(),
            loan: LoanDefaults::default(),
            split: SplitDefaults::default(),
            projection_months: 12,
            schedule_periods: 12,
            export_period_limit: 1200,
            categories: default_categories(),
            budgets: default_budgets(),
        }
    }
}

fn default_categories() -> Vec<String> {
    [
        "Food & Dining",
        "Transportation",
        "Housing",
        "Utilities",
        "Healthcare",
        "Entertainment",
        "Shopping",
        "Education",
        "Personal Care",
        "Savings",
        "Investments",
        "Other",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_budgets() -> Vec<BudgetLine> {
    vec![
        BudgetLine::new("Food & Dining", 300.0, 250.0),
        BudgetLine::new("Transportation", 150.0, 120.0),
        BudgetLine::new("Housing", 1000.0, 1000.0),
        BudgetLine::new("Utilities", 200.0, 180.0),
        BudgetLine::new("Entertainment", 100.0, 80.0),
    ]
}

impl AppConfig {
    /// Load configuration from a JSON file. Missing sections take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_forms() {
        let config = AppConfig::default();

        assert_eq!(config.calculator.history_limit, 5);
        assert_eq!(config.projection_months, 12);
        assert_eq!(config.schedule_periods, 12);
        assert_eq!(config.export_period_limit, 1200);
        assert_eq!(config.loan.loan_amount, 200_000.0);
        assert_eq!(config.savings.compounding, CompoundingFrequency::Monthly);
        assert_eq!(config.categories.len(), 12);
        assert_eq!(config.budgets.len(), 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "calculator": {{ "history_limit": 3 }}, "split": {{ "tip_percent": 20 }} }}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.calculator.history_limit, 3);
        assert_eq!(config.split.tip_percent, 20.0);
        assert_eq!(config.split.tax_percent, 8.0);
        assert_eq!(config.logging.default, "warn");
    }

    #[test]
    fn test_invalid_file_reports_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn test_load_without_path() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
