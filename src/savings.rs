// 💰 Savings Projector - compound growth with recurring contributions

use crate::error::finite_or_zero;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Annual,
        CompoundingFrequency::SemiAnnual,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::SemiAnnual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }

    pub fn from_periods(periods: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.periods_per_year() == periods)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompoundingFrequency::Annual => "Annual",
            CompoundingFrequency::SemiAnnual => "Semi-Annual",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Daily => "Daily",
        }
    }

    /// Cycle to the next frequency, wrapping around.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsInput {
    pub principal: f64,
    /// Added once per compounding period
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    pub compounding: CompoundingFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub future_value: f64,
    pub total_invested: f64,
    pub interest_earned: f64,
    pub return_on_investment_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub balance: f64,
}

/// Annuity future value: `PV·(1+r)^n + PMT·((1+r)^n − 1)/r`, or `PV + PMT·n` at `r = 0`.
pub fn compute_future_value(
    periodic_rate: f64,
    total_periods: f64,
    periodic_contribution: f64,
    present_value: f64,
) -> f64 {
    if periodic_rate == 0.0 {
        return finite_or_zero(present_value + periodic_contribution * total_periods);
    }

    let growth = (1.0 + periodic_rate).powf(total_periods);
    let fv = present_value * growth + periodic_contribution * ((growth - 1.0) / periodic_rate);
    finite_or_zero(fv)
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

/// Full result for one set of inputs. Negative fields count as 0.
pub fn project(input: &SavingsInput) -> SavingsResult {
    let principal = non_negative(input.principal);
    let contribution = non_negative(input.monthly_contribution);
    let rate = non_negative(input.annual_rate_percent) / 100.0;
    let years = non_negative(input.years);
    let periods_per_year = input.compounding.periods_per_year() as f64;

    let periodic_rate = rate / periods_per_year;
    let total_periods = years * periods_per_year;

    let future_value = compute_future_value(periodic_rate, total_periods, contribution, principal);
    let total_invested = finite_or_zero(principal + contribution * total_periods);
    let interest_earned = future_value - total_invested;
    let return_on_investment_percent = if total_invested > 0.0 {
        interest_earned / total_invested * 100.0
    } else {
        0.0
    };

    tracing::debug!(
        future_value,
        total_invested,
        periods = total_periods,
        "savings projection computed"
    );

    SavingsResult {
        future_value,
        total_invested,
        interest_earned: finite_or_zero(interest_earned),
        return_on_investment_percent: finite_or_zero(return_on_investment_percent),
    }
}

/// Month-by-month balance at a monthly rate, contribution added after interest.
/// Each step is rounded to cents before the next one compounds on it.
pub fn monthly_projection(input: &SavingsInput, months: u32) -> Vec<ProjectionPoint> {
    let monthly_rate = non_negative(input.annual_rate_percent) / 100.0 / 12.0;
    let contribution = non_negative(input.monthly_contribution);
    let mut balance = non_negative(input.principal);

    (1..=months)
        .map(|month| {
            balance = round_cents(balance * (1.0 + monthly_rate) + contribution);
            ProjectionPoint { month, balance }
        })
        .collect()
}

pub fn round_cents(value: f64) -> f64 {
    finite_or_zero((value * 100.0).round() / 100.0)
}

// ============================================================================
// TESTS
// ============================================================================
