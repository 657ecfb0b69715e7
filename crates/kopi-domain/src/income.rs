//! Domain types representing recurring incomes.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{
    de::{Deserializer, IgnoredAny},
    Deserialize, Serialize,
};

use crate::common::*;

/// Recurrence cadence of an income.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Converts one payment at this cadence into its monthly-equivalent figure.
    pub fn to_monthly(self, amount: f64) -> f64 {
        match self {
            Frequency::Daily => amount * 30.0,
            Frequency::Weekly => amount * 4.33,
            Frequency::Biweekly => amount * 2.17,
            Frequency::Monthly => amount,
            Frequency::Quarterly => amount / 3.0,
            Frequency::Yearly => amount / 12.0,
        }
    }

    /// Short per-period suffix shown next to an amount.
    pub fn period_suffix(self) -> &'static str {
        match self {
            Frequency::Daily => "/day",
            Frequency::Weekly => "/wk",
            Frequency::Biweekly => "/2 wk",
            Frequency::Monthly => "/mo",
            Frequency::Quarterly => "/qtr",
            Frequency::Yearly => "/yr",
        }
    }

    /// Parses a stored or user-supplied value. Anything unrecognised is monthly.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::Biweekly,
            "quarterly" => Frequency::Quarterly,
            "yearly" => Frequency::Yearly,
            _ => Frequency::Monthly,
        }
    }
}

impl FromStr for Frequency {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Frequency::parse_lenient(value))
    }
}

/// Any stored frequency value; non-strings carry no cadence.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFrequency {
    Text(String),
    Other(IgnoredAny),
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawFrequency::deserialize(deserializer)? {
            RawFrequency::Text(value) => Frequency::parse_lenient(&value),
            RawFrequency::Other(_) => Frequency::Monthly,
        })
    }
}

/// A recurring income paid on a fixed day of each month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub frequency: Frequency,
    pub payment_day: u32,
}

impl Income {
    pub const DEFAULT_PAYMENT_DAY: u32 = 1;

    pub fn new(name: impl Into<String>, amount: f64, frequency: Frequency, payment_day: u32) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            amount: normalize_amount(amount),
            frequency,
            payment_day,
        }
    }
}

impl Identifiable for Income {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Income {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Income {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Scheduled for Income {
    fn payment_day(&self) -> u32 {
        self.payment_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_frequency_deserializes_as_monthly() {
        let income: Income = serde_json::from_str(
            r#"{"id":"a","name":"Gig","amount":10,"frequency":"fortnightly","paymentDay":3}"#,
        )
        .expect("decode income");
        assert_eq!(income.frequency, Frequency::Monthly);
    }

    #[test]
    fn non_string_frequency_deserializes_as_monthly() {
        for raw in ["3", "null", "true", r#"{"every":"week"}"#] {
            let json = format!(r#"{{"id":"a","name":"Gig","amount":10,"frequency":{raw},"paymentDay":3}}"#);
            let income: Income = serde_json::from_str(&json).expect("decode income");
            assert_eq!(income.frequency, Frequency::Monthly, "frequency {raw}");
        }
    }

    #[test]
    fn frequency_parses_from_str() {
        assert_eq!("  Weekly ".parse::<Frequency>(), Ok(Frequency::Weekly));
        assert_eq!("sometimes".parse::<Frequency>(), Ok(Frequency::Monthly));
        assert_eq!(Frequency::parse_lenient("YEARLY"), Frequency::Yearly);
    }

    #[test]
    fn missing_frequency_deserializes_as_monthly() {
        let income: Income =
            serde_json::from_str(r#"{"id":"a","name":"Gig","amount":10,"paymentDay":3}"#)
                .expect("decode income");
        assert_eq!(income.frequency, Frequency::Monthly);
    }

    #[test]
    fn income_serializes_with_camel_case_fields() {
        let income = Income {
            id: "x1".into(),
            name: "Salary".into(),
            amount: 100.0,
            frequency: Frequency::Biweekly,
            payment_day: 12,
        };
        let json = serde_json::to_value(&income).expect("encode income");
        assert_eq!(json["paymentDay"], 12);
        assert_eq!(json["frequency"], "biweekly");
    }

    #[test]
    fn new_income_coerces_negative_amount() {
        let income = Income::new("Refund", -5.0, Frequency::Monthly, 1);
        assert_eq!(income.amount, 0.0);
        assert!(!income.id.is_empty());
    }
}
