// 🧾 Expense Splitter - share of a bill after tax and tip

use crate::error::finite_or_zero;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitInput {
    pub total_amount: f64,
    pub number_of_people: u32,
    pub tip_percent: f64,
    pub tax_percent: f64,
    /// Round each share up to a whole currency unit
    pub round_up: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    /// Share to pay, after rounding when requested
    pub per_person: f64,
    /// Share before rounding, for the "rounded from" hint
    pub unrounded_per_person: f64,
    pub rounded: bool,
    pub total_with_tax_and_tip: f64,
    pub tax_amount: f64,
    pub tip_amount: f64,
}

/// Tax and tip are both charged on the base amount.
pub fn split(input: &SplitInput) -> SplitResult {
    let amount = finite_or_zero(input.total_amount).max(0.0);
    let tip = finite_or_zero(input.tip_percent).max(0.0);
    let tax = finite_or_zero(input.tax_percent).max(0.0);
    let people = input.number_of_people.max(1) as f64;

    let total_with_tax_and_tip = finite_or_zero(amount * (1.0 + (tip + tax) / 100.0));
    let unrounded_per_person = finite_or_zero(total_with_tax_and_tip / people);
    let per_person = if input.round_up {
        finite_or_zero(unrounded_per_person.ceil())
    } else {
        unrounded_per_person
    };

    SplitResult {
        per_person,
        unrounded_per_person,
        rounded: input.round_up,
        total_with_tax_and_tip,
        tax_amount: finite_or_zero(amount * tax / 100.0),
        tip_amount: finite_or_zero(amount * tip / 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(amount: f64, people: u32, round_up: bool) -> SplitInput {
        SplitInput {
            total_amount: amount,
            number_of_people: people,
            tip_percent: 15.0,
            tax_percent: 8.0,
            round_up,
        }
    }

    #[test]
    fn test_split_four_ways() {
        let result = split(&bill(100.0, 4, false));

        assert!((result.total_with_tax_and_tip - 123.0).abs() < 1e-9);
        assert!((result.per_person - 30.75).abs() < 1e-9);
        assert_eq!(result.per_person, result.unrounded_per_person);
        assert!(!result.rounded);
        assert!((result.tax_amount - 8.0).abs() < 1e-9);
        assert!((result.tip_amount - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_up_keeps_original_share() {
        let result = split(&bill(100.0, 4, true));

        assert_eq!(result.per_person, 31.0);
        assert!((result.unrounded_per_person - 30.75).abs() < 1e-9);
        assert!(result.rounded);
    }

    #[test]
    fn test_zero_people_treated_as_one() {
        let result = split(&bill(50.0, 0, false));
        assert!((result.per_person - 61.5).abs() < 1e-9);
    }

    #[test]
    fn test_tip_and_tax_on_base_amount() {
        let input = SplitInput {
            total_amount: 200.0,
            number_of_people: 2,
            tip_percent: 10.0,
            tax_percent: 10.0,
            round_up: false,
        };
        let result = split(&input);

        assert!((result.tip_amount - 20.0).abs() < 1e-9);
        assert!((result.tax_amount - 20.0).abs() < 1e-9);
        assert!((result.total_with_tax_and_tip - 240.0).abs() < 1e-9);
    }

    fn assert_all_finite(result: &SplitResult) {
        for value in [
            result.per_person,
            result.unrounded_per_person,
            result.total_with_tax_and_tip,
            result.tax_amount,
            result.tip_amount,
        ] {
            assert!(value.is_finite(), "non-finite figure in {:?}", result);
        }
    }

    #[test]
    fn test_extreme_percentages_yield_defined_figures() {
        // 0 * (1 + inf) would be NaN
        let empty = SplitInput {
            total_amount: 0.0,
            number_of_people: 2,
            tip_percent: 1e308,
            tax_percent: 1e308,
            round_up: true,
        };
        let result = split(&empty);
        assert_all_finite(&result);
        assert_eq!(result.per_person, 0.0);

        let huge = SplitInput {
            total_amount: 1e300,
            ..empty
        };
        let result = split(&huge);
        assert_all_finite(&result);
        assert_eq!(result.total_with_tax_and_tip, 0.0);
        assert_eq!(result.tip_amount, 0.0);
    }

    #[test]
    fn test_malformed_form_text_yields_defined_figures() {
        let mut form = crate::input::SplitForm::from_config(&crate::config::AppConfig::default());
        form.total_amount = String::new();
        form.tip_percent = "1e308".to_string();
        form.tax_percent = "1e308".to_string();
        form.number_of_people = "zero".to_string();

        assert_all_finite(&split(&form.to_input()));
    }

    #[test]
    fn test_empty_bill() {
        let result = split(&bill(0.0, 3, true));
        assert_eq!(result.per_person, 0.0);
        assert_eq!(result.total_with_tax_and_tip, 0.0);
    }
}
