//! Aggregations over the store: totals, projections, per-income breakdowns and list ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use kopi_domain::{
    normalize_amount, Amounted, Expense, ExpenseKind, FinanceStore, Income, NamedEntity,
};

use crate::{countdown::Countdown, frequency::income_monthly_amount, time::MonthContext};

/// Days in the nominal month used by daily projections.
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const YEARS_PER_DECADE: f64 = 10.0;

/// A monthly figure spread over the four forecast horizons.
///
/// The decade is a flat ten years of twelve months, not a calendar calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub decade: f64,
}

impl Projection {
    pub fn from_monthly(monthly: f64) -> Self {
        let yearly = monthly * MONTHS_PER_YEAR;
        Self {
            daily: monthly / DAYS_PER_MONTH,
            monthly,
            yearly,
            decade: yearly * YEARS_PER_DECADE,
        }
    }
}

/// Headline totals for the whole store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub monthly_income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// One line of the forecast table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastRow {
    pub label: String,
    pub projection: Projection,
}

/// Income, expense and balance projections plus their per-record details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastTable {
    pub income: Projection,
    pub expenses: Projection,
    pub balance: Projection,
    pub income_details: Vec<ForecastRow>,
    pub expense_details: Vec<ForecastRow>,
}

/// An expense together with the collection it lives in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub kind: ExpenseKind,
    pub expense: Expense,
}

/// An income with its derived monthly amount and payment countdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledIncome {
    pub income: Income,
    pub monthly_amount: f64,
    pub countdown: Countdown,
}

/// Everything shown for a single income: what it brings in and what is paid out of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeBreakdown {
    pub income: ScheduledIncome,
    pub linked_expenses: Vec<ExpenseEntry>,
    pub linked_total: f64,
    pub remaining: f64,
}

/// Which subset of data a view is built for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Income(String),
}

/// Expense total shown on a filter selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSummary {
    /// `None` for the "all" filter.
    pub income_id: Option<String>,
    pub label: String,
    pub expenses: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of every income's monthly-equivalent amount.
    pub fn total_monthly_income(incomes: &[Income]) -> f64 {
        incomes.iter().map(income_monthly_amount).sum()
    }

    /// Sum of both expense collections; expense amounts are already monthly.
    pub fn total_expenses(fixed: &[Expense], variable: &[Expense]) -> f64 {
        fixed.iter().chain(variable).map(expense_amount).sum()
    }

    pub fn balance(incomes: &[Income], fixed: &[Expense], variable: &[Expense]) -> f64 {
        Self::total_monthly_income(incomes) - Self::total_expenses(fixed, variable)
    }

    pub fn totals(store: &FinanceStore) -> Totals {
        let monthly_income = Self::total_monthly_income(&store.incomes);
        let expenses = Self::total_expenses(&store.fixed_expenses, &store.variable_expenses);
        Totals {
            monthly_income,
            expenses,
            balance: monthly_income - expenses,
        }
    }

    /// Sum of expenses in both collections linked to `income_id`.
    pub fn expenses_for_income(income_id: &str, fixed: &[Expense], variable: &[Expense]) -> f64 {
        fixed
            .iter()
            .chain(variable)
            .filter(|expense| expense.is_linked_to(income_id))
            .map(expense_amount)
            .sum()
    }

    pub fn projection(monthly: f64) -> Projection {
        Projection::from_monthly(monthly)
    }

    pub fn forecast_table(store: &FinanceStore) -> ForecastTable {
        let totals = Self::totals(store);
        let income_details = store
            .incomes
            .iter()
            .map(|income| forecast_row(income, income_monthly_amount(income)))
            .collect();
        let expense_details = store
            .all_expenses()
            .map(|expense| forecast_row(expense, expense_amount(expense)))
            .collect();
        ForecastTable {
            income: Projection::from_monthly(totals.monthly_income),
            expenses: Projection::from_monthly(totals.expenses),
            balance: Projection::from_monthly(totals.balance),
            income_details,
            expense_details,
        }
    }

    /// Incomes ordered by soonest payment; ties keep insertion order.
    pub fn incomes_by_next_payment(incomes: &[Income], month: &MonthContext) -> Vec<ScheduledIncome> {
        let mut scheduled: Vec<_> = incomes
            .iter()
            .map(|income| Self::schedule(income, month))
            .collect();
        scheduled.sort_by_key(|entry| entry.countdown.days);
        scheduled
    }

    /// Both expense collections ordered by descending amount; ties keep insertion order.
    pub fn expenses_by_amount(store: &FinanceStore) -> Vec<ExpenseEntry> {
        let mut entries: Vec<_> = store
            .all_expenses_with_kind()
            .map(|(kind, expense)| ExpenseEntry {
                kind,
                expense: expense.clone(),
            })
            .collect();
        sort_by_amount_desc(&mut entries);
        entries
    }

    /// Expenses linked to `income_id`, largest first.
    pub fn linked_expenses(store: &FinanceStore, income_id: &str) -> Vec<ExpenseEntry> {
        let mut entries: Vec<_> = store
            .all_expenses_with_kind()
            .filter(|(_, expense)| expense.is_linked_to(income_id))
            .map(|(kind, expense)| ExpenseEntry {
                kind,
                expense: expense.clone(),
            })
            .collect();
        sort_by_amount_desc(&mut entries);
        entries
    }

    /// Detail view for one income, or `None` when the id is unknown.
    pub fn income_breakdown(
        store: &FinanceStore,
        income_id: &str,
        month: &MonthContext,
    ) -> Option<IncomeBreakdown> {
        let income = store.income(income_id)?;
        let scheduled = Self::schedule(income, month);
        let linked_expenses = Self::linked_expenses(store, income_id);
        let linked_total: f64 = linked_expenses
            .iter()
            .map(|entry| expense_amount(&entry.expense))
            .sum();
        let remaining = scheduled.monthly_amount - linked_total;
        Some(IncomeBreakdown {
            income: scheduled,
            linked_expenses,
            linked_total,
            remaining,
        })
    }

    /// One summary for "all" followed by one per income, in insertion order.
    pub fn filter_summaries(store: &FinanceStore) -> Vec<FilterSummary> {
        let mut summaries = Vec::with_capacity(store.incomes.len() + 1);
        summaries.push(FilterSummary {
            income_id: None,
            label: "All".into(),
            expenses: Self::total_expenses(&store.fixed_expenses, &store.variable_expenses),
        });
        summaries.extend(store.incomes.iter().map(|income| FilterSummary {
            income_id: Some(income.id.clone()),
            label: income.name.clone(),
            expenses: Self::expenses_for_income(
                &income.id,
                &store.fixed_expenses,
                &store.variable_expenses,
            ),
        }));
        summaries
    }

    fn schedule(income: &Income, month: &MonthContext) -> ScheduledIncome {
        ScheduledIncome {
            income: income.clone(),
            monthly_amount: income_monthly_amount(income),
            countdown: Countdown::new(income.payment_day, month),
        }
    }
}

fn expense_amount<T: Amounted>(expense: &T) -> f64 {
    normalize_amount(expense.amount())
}

fn forecast_row<T: NamedEntity>(record: &T, monthly: f64) -> ForecastRow {
    ForecastRow {
        label: record.name().to_string(),
        projection: Projection::from_monthly(monthly),
    }
}

fn sort_by_amount_desc(entries: &mut [ExpenseEntry]) {
    entries.sort_by(|a, b| {
        expense_amount(&b.expense)
            .partial_cmp(&expense_amount(&a.expense))
            .unwrap_or(Ordering::Equal)
    });
}
