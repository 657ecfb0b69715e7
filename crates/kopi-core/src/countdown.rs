//! Days-until-payment arithmetic and its display classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::MonthContext;

/// Days remaining until `payment_day`, wrapping into next month once it has passed.
///
/// A payment day beyond `days_in_month` is not clamped: it yields a count that does not
/// correspond to a real calendar date.
pub fn days_until(payment_day: u32, current_day: u32, days_in_month: u32) -> u32 {
    if payment_day == current_day {
        0
    } else if payment_day > current_day {
        payment_day - current_day
    } else {
        (days_in_month + payment_day).saturating_sub(current_day)
    }
}

/// [`days_until`] evaluated against a [`MonthContext`].
pub fn days_until_in(payment_day: u32, month: &MonthContext) -> u32 {
    days_until(payment_day, month.current_day, month.days_in_month)
}

/// How close a payment is, used to pick a badge style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentUrgency {
    Today,
    Soon,
    Later,
}

impl PaymentUrgency {
    /// Largest countdown still considered "soon".
    pub const SOON_THRESHOLD: u32 = 3;

    pub fn classify(days: u32) -> Self {
        match days {
            0 => PaymentUrgency::Today,
            1..=Self::SOON_THRESHOLD => PaymentUrgency::Soon,
            _ => PaymentUrgency::Later,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentUrgency::Today => "today",
            PaymentUrgency::Soon => "soon",
            PaymentUrgency::Later => "later",
        }
    }
}

impl fmt::Display for PaymentUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Countdown to a payment together with its classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Countdown {
    pub payment_day: u32,
    pub days: u32,
    pub urgency: PaymentUrgency,
}

impl Countdown {
    pub fn new(payment_day: u32, month: &MonthContext) -> Self {
        let days = days_until_in(payment_day, month);
        Self {
            payment_day,
            days,
            urgency: PaymentUrgency::classify(days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_is_zero() {
        for day in 1..=31 {
            assert_eq!(days_until(day, day, 31), 0);
            assert_eq!(days_until(day, day, 28), 0);
        }
    }

    #[test]
    fn upcoming_and_wrapped_days() {
        assert_eq!(days_until(5, 1, 30), 4);
        assert_eq!(days_until(1, 5, 30), 26);
        assert_eq!(days_until(31, 30, 31), 1);
    }

    #[test]
    fn day_beyond_month_length_is_not_clamped() {
        // June has 30 days; day 31 is reported as if it existed.
        assert_eq!(days_until(31, 10, 30), 21);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(PaymentUrgency::classify(0), PaymentUrgency::Today);
        assert_eq!(PaymentUrgency::classify(1), PaymentUrgency::Soon);
        assert_eq!(PaymentUrgency::classify(3), PaymentUrgency::Soon);
        assert_eq!(PaymentUrgency::classify(4), PaymentUrgency::Later);
        assert_eq!(PaymentUrgency::Later.label(), "later");
    }
}
