// ⚠️ Calculation Errors
// Failures the arithmetic primitives can report. None of them escape the engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of negative number {value}")]
    InvalidDomain { value: f64 },

    #[error("could not parse '{input}' as a number")]
    ParseFailure { input: String },

    #[error("result is out of range")]
    Overflow,
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Collapse NaN and infinities to 0 so no caller ever renders them.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(12.5), 12.5);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            CalcError::ParseFailure { input: "abc".to_string() }.to_string(),
            "could not parse 'abc' as a number"
        );
    }
}
