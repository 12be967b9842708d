//! Derived fields: body mass index and the weight-status verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the underweight band.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// Lower bound (inclusive) of the obese band.
pub const OBESE_FROM: f64 = 30.0;

/// Weight-status label derived from a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `weight / height^2`, rounded to two decimals.
///
/// Height is in metres and weight in kilograms. No validation happens here;
/// callers pass values that already passed the record checks.
pub fn compute_bmi(height: f64, weight: f64) -> f64 {
    round_to_hundredths(weight / (height * height))
}

/// Map a BMI value onto its verdict.
///
/// There is no separate overweight band: everything from 18.5 up to (but not
/// including) 30 reports as `Normal`.
pub fn compute_verdict(bmi: f64) -> Verdict {
    if bmi < UNDERWEIGHT_BELOW {
        Verdict::Underweight
    } else if bmi < OBESE_FROM {
        Verdict::Normal
    } else {
        Verdict::Obese
    }
}

/// Round the exact binary value to two decimals, ties to even.
///
/// Scaling by 100 first would round the scaled product instead, which drifts
/// on values such as 2.675.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
