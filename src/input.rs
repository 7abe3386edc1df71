// ⌨️ Input Fields - text as typed by a user, parsed leniently
// Invalid or empty text never fails a calculation: it reads as 0.

use crate::config::AppConfig;
use crate::emi::LoanInput;
use crate::error::{CalcError, CalcResult};
use crate::savings::{CompoundingFrequency, SavingsInput};
use crate::split::SplitInput;
use serde::{Deserialize, Serialize};

// ============================================================================
// PARSING
// ============================================================================

/// Strict parse: trims, drops a leading `$` and thousands separators.
pub fn try_parse_amount(text: &str) -> CalcResult<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::ParseFailure {
            input: text.to_string(),
        }),
    }
}

/// Lenient parse used by every form field.
pub fn parse_amount(text: &str) -> f64 {
    match try_parse_amount(text) {
        Ok(value) => value,
        Err(err) => {
            if !text.trim().is_empty() {
                tracing::trace!(error = %err, "coercing field to 0");
            }
            0.0
        }
    }
}

/// Integer-prefix parse (`"2.7"` reads as 2). Invalid or zero yields `fallback`.
pub fn parse_count(text: &str, fallback: u32) -> u32 {
    let trimmed = text.trim();
    let digits: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => fallback,
        Ok(n) => n,
    }
}

// ============================================================================
// FORMS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsForm {
    pub principal: String,
    pub monthly_contribution: String,
    pub annual_rate_percent: String,
    pub years: String,
    pub compounding: CompoundingFrequency,
}

impl SavingsForm {
    pub fn from_config(config: &AppConfig) -> Self {
        let d = &config.savings;
        SavingsForm {
            principal: d.principal.to_string(),
            monthly_contribution: d.monthly_contribution.to_string(),
            annual_rate_percent: d.annual_rate_percent.to_string(),
            years: d.years.to_string(),
            compounding: d.compounding,
        }
    }

    pub fn to_input(&self) -> SavingsInput {
        SavingsInput {
            principal: parse_amount(&self.principal),
            monthly_contribution: parse_amount(&self.monthly_contribution),
            annual_rate_percent: parse_amount(&self.annual_rate_percent),
            years: parse_amount(&self.years),
            compounding: self.compounding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanForm {
    pub loan_amount: String,
    pub annual_interest_rate_percent: String,
    pub term_years: String,
    pub down_payment_percent: String,
    pub processing_fee_percent: String,
}

impl LoanForm {
    pub fn from_config(config: &AppConfig) -> Self {
        let d = &config.loan;
        LoanForm {
            loan_amount: d.loan_amount.to_string(),
            annual_interest_rate_percent: d.annual_interest_rate_percent.to_string(),
            term_years: d.term_years.to_string(),
            down_payment_percent: d.down_payment_percent.to_string(),
            processing_fee_percent: d.processing_fee_percent.to_string(),
        }
    }

    pub fn to_input(&self) -> LoanInput {
        LoanInput {
            loan_amount: parse_amount(&self.loan_amount),
            annual_interest_rate_percent: parse_amount(&self.annual_interest_rate_percent),
            term_years: parse_amount(&self.term_years),
            down_payment_percent: parse_amount(&self.down_payment_percent),
            processing_fee_percent: parse_amount(&self.processing_fee_percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitForm {
    pub total_amount: String,
    pub number_of_people: String,
    pub tip_percent: String,
    pub tax_percent: String,
    pub round_up: bool,
}

impl SplitForm {
    /// The bill amount starts empty; everything else comes from config.
    pub fn from_config(config: &AppConfig) -> Self {
        let d = &config.split;
        SplitForm {
            total_amount: String::new(),
            number_of_people: d.number_of_people.to_string(),
            tip_percent: d.tip_percent.to_string(),
            tax_percent: d.tax_percent.to_string(),
            round_up: d.round_up,
        }
    }

    pub fn to_input(&self) -> SplitInput {
        SplitInput {
            total_amount: parse_amount(&self.total_amount),
            number_of_people: parse_count(&self.number_of_people, 1),
            tip_percent: parse_amount(&self.tip_percent),
            tax_percent: parse_amount(&self.tax_percent),
            round_up: self.round_up,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
