use kopi_core::PaymentUrgency;

/// Rounds to whole units and separates thousands with spaces: `1234567.4` -> `1 234 567`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let rounded = value.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// [`format_amount`] followed by the currency symbol.
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    format!("{} {}", format_amount(value), currency_symbol)
}

pub fn day_word(days: u32) -> &'static str {
    if days == 1 {
        "day"
    } else {
        "days"
    }
}

/// Badge text for an income countdown.
pub fn payment_badge(urgency: PaymentUrgency, days: u32, payment_day: u32) -> String {
    match urgency {
        PaymentUrgency::Today => "Today".into(),
        PaymentUrgency::Soon => format!("In {} {}", days, day_word(days)),
        PaymentUrgency::Later => format!("On day {}", payment_day),
    }
}
