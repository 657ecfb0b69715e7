//! Conversion of recurring amounts into monthly equivalents.

use kopi_domain::{normalize_amount, Frequency, Income};

/// Converts one payment at `frequency` into its monthly-equivalent value.
///
/// No rounding is applied; negative or non-finite amounts count as zero.
pub fn monthly_equivalent(amount: f64, frequency: Frequency) -> f64 {
    frequency.to_monthly(normalize_amount(amount))
}

/// Monthly-equivalent value of an income record.
pub fn income_monthly_amount(income: &Income) -> f64 {
    monthly_equivalent(income.amount, income.frequency)
}
