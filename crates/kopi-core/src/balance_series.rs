//! Cumulative balance across the days of one month, for charting.

use kopi_domain::{normalize_amount, Amounted, Expense, FinanceStore, Income, Scheduled};

use crate::frequency::income_monthly_amount;

/// Running balance per day of month; index 0 is day 1.
///
/// Each income adds its monthly-equivalent amount on its payment day and each expense
/// subtracts its amount on its payment day. Payment days outside the month are dropped.
pub fn daily_balance_series<'a, I>(incomes: &[Income], expenses: I, days_in_month: u32) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let len = days_in_month as usize;
    let mut deltas = vec![0.0_f64; len];

    for income in incomes {
        if let Some(slot) = day_index(income, len) {
            deltas[slot] += income_monthly_amount(income);
        }
    }
    for expense in expenses {
        if let Some(slot) = day_index(expense, len) {
            deltas[slot] -= normalize_amount(expense.amount());
        }
    }

    let mut running = 0.0;
    deltas
        .into_iter()
        .map(|delta| {
            running += delta;
            running
        })
        .collect()
}

/// [`daily_balance_series`] over every expense in `store`.
pub fn store_balance_series(store: &FinanceStore, days_in_month: u32) -> Vec<f64> {
    daily_balance_series(&store.incomes, store.all_expenses(), days_in_month)
}

fn day_index<T: Scheduled>(record: &T, len: usize) -> Option<usize> {
    let idx = (record.payment_day() as usize).checked_sub(1)?;
    (idx < len).then_some(idx)
}
