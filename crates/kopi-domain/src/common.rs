//! Shared traits and value helpers for incomes and expenses.

use uuid::Uuid;

/// Earliest day of month a payment can be scheduled on.
pub const MIN_PAYMENT_DAY: u32 = 1;
/// Latest day of month a payment can be scheduled on.
pub const MAX_PAYMENT_DAY: u32 = 31;

/// Exposes the opaque identifier of a stored record.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Day-of-month on which a record occurs.
pub trait Scheduled {
    fn payment_day(&self) -> u32;
}

/// Generates a fresh opaque identifier for a new record.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Coerces an amount into the non-negative finite range used by every calculation.
pub fn normalize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Returns `true` when `day` is a valid payment day.
pub fn is_valid_payment_day(day: i64) -> bool {
    (MIN_PAYMENT_DAY as i64..=MAX_PAYMENT_DAY as i64).contains(&day)
}

/// Parses a user-entered amount the way a lenient form field does.
///
/// The longest numeric prefix is used (`"12.5abc"` is `12.5`); input without one yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut idx = end;
    while idx < bytes.len() {
        match bytes[idx] {
            b'0'..=b'9' => {
                seen_digit = true;
                idx += 1;
                end = idx;
            }
            b'.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                idx += 1;
                if seen_digit {
                    end = idx;
                }
            }
            b'e' | b'E' if seen_digit && !seen_exp => {
                let mut exp_idx = idx + 1;
                if matches!(bytes.get(exp_idx), Some(b'+') | Some(b'-')) {
                    exp_idx += 1;
                }
                if matches!(bytes.get(exp_idx), Some(b'0'..=b'9')) {
                    seen_exp = true;
                    idx = exp_idx;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }

    if !seen_digit {
        return 0.0;
    }
    trimmed[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .map(|value| if value.is_finite() { value } else { 0.0 })
        .unwrap_or(0.0)
}

/// Parses a user-entered payment day; unparseable input falls back to day 1.
///
/// Out-of-range integers are returned unchanged so validation can reject them.
pub fn parse_payment_day(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|(idx, ch)| !(ch.is_ascii_digit() || (*idx == 0 && (*ch == '-' || *ch == '+'))))
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());
    match trimmed[..digits_end].parse::<i64>() {
        Ok(0) | Err(_) => MIN_PAYMENT_DAY as i64,
        Ok(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_follows_numeric_prefix() {
        assert_eq!(parse_amount("1500"), 1500.0);
        assert_eq!(parse_amount("  12.5abc"), 12.5);
        assert_eq!(parse_amount("3."), 3.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("-40"), -40.0);
    }

    #[test]
    fn normalize_amount_drops_negative_and_non_finite() {
        assert_eq!(normalize_amount(42.0), 42.0);
        assert_eq!(normalize_amount(-1.0), 0.0);
        assert_eq!(normalize_amount(f64::NAN), 0.0);
        assert_eq!(normalize_amount(f64::INFINITY), 0.0);
    }

    #[test]
    fn parse_payment_day_defaults_to_first() {
        assert_eq!(parse_payment_day("15"), 15);
        assert_eq!(parse_payment_day("7th"), 7);
        assert_eq!(parse_payment_day(""), 1);
        assert_eq!(parse_payment_day("soon"), 1);
        assert_eq!(parse_payment_day("45"), 45);
        assert_eq!(parse_payment_day("-3"), -3);
    }

    #[test]
    fn payment_day_bounds() {
        assert!(is_valid_payment_day(1));
        assert!(is_valid_payment_day(31));
        assert!(!is_valid_payment_day(0));
        assert!(!is_valid_payment_day(32));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
