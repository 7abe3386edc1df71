// 🏦 EMI Calculator - fixed monthly installment and amortization schedule

use crate::error::finite_or_zero;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub loan_amount: f64,
    pub annual_interest_rate_percent: f64,
    pub term_years: f64,
    /// Share of the loan amount paid upfront (0 - 100)
    pub down_payment_percent: f64,
    /// Charged on the financed principal and rolled into the loan
    pub processing_fee_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub down_payment_amount: f64,
    pub principal_financed: f64,
    pub processing_fee_amount: f64,
    pub monthly_installment: f64,
    pub total_payment: f64,
    /// Everything paid beyond the financed principal, fee included
    pub total_interest: f64,
    pub total_periods: u32,
    pub schedule: Vec<AmortizationRow>,
}

/// Loan terms after the input has been normalized.
struct Terms {
    principal: f64,
    fee: f64,
    monthly_rate: f64,
    periods: f64,
}

impl Terms {
    fn from_input(input: &LoanInput) -> (Self, f64) {
        let loan_amount = finite_or_zero(input.loan_amount).max(0.0);
        let down_percent = finite_or_zero(input.down_payment_percent).clamp(0.0, 100.0);
        let fee_percent = finite_or_zero(input.processing_fee_percent).max(0.0);
        let rate_percent = finite_or_zero(input.annual_interest_rate_percent).max(0.0);
        let years = finite_or_zero(input.term_years).max(0.0);

        let down_payment = finite_or_zero(loan_amount * down_percent / 100.0);
        let principal = finite_or_zero(loan_amount - down_payment);
        let terms = Terms {
            principal,
            fee: finite_or_zero(principal * fee_percent / 100.0),
            monthly_rate: finite_or_zero(rate_percent / 100.0 / 12.0),
            periods: finite_or_zero(years * 12.0),
        };
        (terms, down_payment)
    }

    fn financed(&self) -> f64 {
        finite_or_zero(self.principal + self.fee)
    }

    fn installment(&self) -> f64 {
        let financed = self.financed();
        if self.periods <= 0.0 {
            return 0.0;
        }
        if self.monthly_rate == 0.0 {
            return finite_or_zero(financed / self.periods);
        }

        let growth = (1.0 + self.monthly_rate).powf(self.periods);
        finite_or_zero(financed * self.monthly_rate * growth / (growth - 1.0))
    }

    fn schedule(&self, installment: f64, periods: u32) -> Vec<AmortizationRow> {
        let mut balance = self.financed();

        (1..=periods)
            .map(|period| {
                let interest = balance * self.monthly_rate;
                let principal_portion = installment - interest;
                balance -= principal_portion;

                AmortizationRow {
                    period,
                    principal_portion: finite_or_zero(principal_portion),
                    interest_portion: finite_or_zero(interest),
                    remaining_balance: finite_or_zero(balance).max(0.0),
                }
            })
            .collect()
    }

    fn whole_periods(&self) -> u32 {
        self.periods.ceil().min(u32::MAX as f64) as u32
    }
}

/// Compute the installment, totals and the first `schedule_periods` rows.
pub fn calculate(input: &LoanInput, schedule_periods: u32) -> LoanResult {
    let (terms, down_payment_amount) = Terms::from_input(input);
    let installment = terms.installment();
    let total_payment = finite_or_zero(installment * terms.periods);
    let total_interest = finite_or_zero(total_payment - terms.principal);
    let total_periods = terms.whole_periods();

    tracing::debug!(
        installment,
        periods = terms.periods,
        monthly_rate = terms.monthly_rate,
        "loan installment computed"
    );

    LoanResult {
        down_payment_amount,
        principal_financed: terms.principal,
        processing_fee_amount: terms.fee,
        monthly_installment: installment,
        total_payment,
        total_interest,
        total_periods,
        schedule: terms.schedule(installment, schedule_periods.min(total_periods)),
    }
}

/// The schedule for every period of the loan, up to `max_periods` rows.
pub fn full_schedule(input: &LoanInput, max_periods: u32) -> Vec<AmortizationRow> {
    let (terms, _) = Terms::from_input(input);
    let installment = terms.installment();
    let total_periods = terms.whole_periods();
    if total_periods > max_periods {
        tracing::warn!(total_periods, max_periods, "amortization schedule truncated");
    }
    terms.schedule(installment, total_periods.min(max_periods))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(amount: f64, rate: f64, years: f64, down: f64, fee: f64) -> LoanInput {
        LoanInput {
            loan_amount: amount,
            annual_interest_rate_percent: rate,
            term_years: years,
            down_payment_percent: down,
            processing_fee_percent: fee,
        }
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = calculate(&loan(200_000.0, 0.0, 20.0, 20.0, 1.0), 12);

        assert_eq!(result.principal_financed, 160_000.0);
        assert_eq!(result.processing_fee_amount, 1_600.0);
        assert_eq!(result.monthly_installment, 161_600.0 / 240.0);
        assert!((result.total_payment - 161_600.0).abs() < 1e-6);
        assert!((result.total_interest - 1_600.0).abs() < 1e-6);
        assert!(!result.monthly_installment.is_nan());
    }

    #[test]
    fn test_standard_amortization_formula() {
        let result = calculate(&loan(200_000.0, 7.5, 20.0, 20.0, 1.0), 12);

        let r: f64 = 0.075 / 12.0;
        let growth = (1.0 + r).powf(240.0);
        let expected = 161_600.0 * r * growth / (growth - 1.0);

        assert!((result.monthly_installment - expected).abs() < 1e-9);
        assert!((result.monthly_installment - 1301.84).abs() < 0.01);
        assert_eq!(result.down_payment_amount, 40_000.0);
        assert_eq!(result.total_periods, 240);
        assert!((result.total_interest - (expected * 240.0 - 160_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_first_year_schedule() {
        let result = calculate(&loan(200_000.0, 7.5, 20.0, 20.0, 1.0), 12);

        assert_eq!(result.schedule.len(), 12);
        let first = &result.schedule[0];
        assert_eq!(first.period, 1);
        assert!((first.interest_portion - 1010.0).abs() < 1e-9);
        assert!(
            (first.principal_portion + first.interest_portion - result.monthly_installment).abs()
                < 1e-9
        );
        assert!(
            (first.remaining_balance - (161_600.0 - first.principal_portion)).abs() < 1e-6
        );

        for pair in result.schedule.windows(2) {
            assert!(pair[1].remaining_balance < pair[0].remaining_balance);
            assert!(pair[1].interest_portion < pair[0].interest_portion);
        }
    }

    #[test]
    fn test_full_schedule_pays_off_loan() {
        let rows = full_schedule(&loan(10_000.0, 6.0, 2.0, 0.0, 0.0), 1200);

        assert_eq!(rows.len(), 24);
        assert!(rows[23].remaining_balance < 1e-6);
        assert!(rows.iter().all(|r| r.remaining_balance >= 0.0));
    }

    #[test]
    fn test_short_loan_schedule_is_capped() {
        let result = calculate(&loan(1_200.0, 0.0, 0.5, 0.0, 0.0), 12);

        assert_eq!(result.total_periods, 6);
        assert_eq!(result.schedule.len(), 6);
        assert_eq!(result.monthly_installment, 200.0);
        assert_eq!(result.schedule[5].remaining_balance, 0.0);
    }

    #[test]
    fn test_zero_term_normalized() {
        let result = calculate(&loan(50_000.0, 5.0, 0.0, 10.0, 0.0), 12);

        assert_eq!(result.monthly_installment, 0.0);
        assert_eq!(result.total_payment, 0.0);
        assert!(result.schedule.is_empty());
        assert!(result.total_interest.is_finite());
    }

    #[test]
    fn test_pathological_inputs_never_nan() {
        let result = calculate(&loan(f64::NAN, f64::INFINITY, -4.0, 250.0, -1.0), 12);

        assert_eq!(result.monthly_installment, 0.0);
        assert_eq!(result.total_payment, 0.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.principal_financed, 0.0);
    }

    #[test]
    fn test_full_schedule_respects_row_limit() {
        let input = loan(100_000.0, 5.0, 100_000_000.0, 0.0, 0.0);

        let rows = full_schedule(&input, 1200);
        assert_eq!(rows.len(), 1200);
        assert_eq!(rows[1199].period, 1200);

        let short = full_schedule(&loan(10_000.0, 6.0, 2.0, 0.0, 0.0), 12);
        assert_eq!(short.len(), 12);
    }

    #[test]
    fn test_zero_rate_with_huge_fee_stays_finite() {
        let result = calculate(&loan(1_200.0, 0.0, 1.0, 0.0, 1e308), 12);

        assert_eq!(result.processing_fee_amount, 0.0);
        assert_eq!(result.monthly_installment, 100.0);
        assert!((result.total_payment - 1_200.0).abs() < 1e-9);
        for value in [
            result.down_payment_amount,
            result.principal_financed,
            result.monthly_installment,
            result.total_payment,
            result.total_interest,
        ] {
            assert!(value.is_finite());
        }
        assert!(result
            .schedule
            .iter()
            .all(|r| r.principal_portion.is_finite() && r.remaining_balance.is_finite()));
    }

    #[test]
    fn test_overflowing_amounts_stay_finite() {
        let result = calculate(&loan(1e308, 0.0, 1e308, 0.0, 100.0), 12);

        assert!(result.monthly_installment.is_finite());
        assert!(result.total_payment.is_finite());
        assert!(result.processing_fee_amount.is_finite());
    }

    #[test]
    fn test_full_down_payment() {
        let result = calculate(&loan(80_000.0, 9.0, 10.0, 100.0, 2.0), 12);

        assert_eq!(result.principal_financed, 0.0);
        assert_eq!(result.monthly_installment, 0.0);
        assert!(result.schedule.iter().all(|r| r.remaining_balance == 0.0));
    }
}
