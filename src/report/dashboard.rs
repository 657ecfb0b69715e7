use serde::Serialize;

use kopi_core::{
    store_balance_series, ExpenseEntry, Filter, FilterSummary, ForecastTable, IncomeBreakdown,
    MonthContext, PaymentUrgency, ScheduledIncome, SummaryService,
};
use kopi_domain::{ExpenseKind, FinanceStore, Frequency};

use super::format::{format_money, payment_badge};

/// One line of the income list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IncomeRow {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    /// Stored amount with its period, e.g. `900 ₽/wk`.
    pub amount_text: String,
    pub monthly_amount: f64,
    pub monthly_text: String,
    pub payment_day: u32,
    pub days_until: u32,
    pub urgency: PaymentUrgency,
    pub badge: String,
}

impl IncomeRow {
    pub fn new(scheduled: &ScheduledIncome, currency_symbol: &str) -> Self {
        let income = &scheduled.income;
        let countdown = scheduled.countdown;
        Self {
            id: income.id.clone(),
            name: income.name.clone(),
            amount: income.amount,
            frequency: income.frequency,
            amount_text: format!(
                "{}{}",
                format_money(income.amount, currency_symbol),
                income.frequency.period_suffix()
            ),
            monthly_amount: scheduled.monthly_amount,
            monthly_text: format_money(scheduled.monthly_amount, currency_symbol),
            payment_day: countdown.payment_day,
            days_until: countdown.days,
            urgency: countdown.urgency,
            badge: payment_badge(countdown.urgency, countdown.days, countdown.payment_day),
        }
    }
}

/// One line of the expense list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpenseRow {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub amount_text: String,
    pub kind: ExpenseKind,
    /// Empty when the expense is not linked to an income.
    pub income_id: String,
}

impl ExpenseRow {
    pub fn new(entry: &ExpenseEntry, currency_symbol: &str) -> Self {
        Self {
            id: entry.expense.id.clone(),
            name: entry.expense.name.clone(),
            amount: entry.expense.amount,
            amount_text: format_money(entry.expense.amount, currency_symbol),
            kind: entry.kind,
            income_id: entry.expense.income_id.clone(),
        }
    }
}

/// Every value a front end shows at once, computed for one filter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub month: MonthContext,
    pub currency_symbol: String,
    /// Income the view is narrowed to; `None` for the full view.
    pub selected_income: Option<String>,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Overall balance, or the selected income's remainder.
    pub balance: f64,
    pub balance_text: String,
    pub incomes: Vec<IncomeRow>,
    pub expenses: Vec<ExpenseRow>,
    pub forecast: ForecastTable,
    pub filters: Vec<FilterSummary>,
    pub balance_series: Vec<f64>,
    pub breakdown: Option<IncomeBreakdown>,
}

impl Dashboard {
    /// Builds the view for `filter`. An income filter naming an unknown id yields the
    /// full view with no breakdown.
    pub fn build(
        store: &FinanceStore,
        month: &MonthContext,
        filter: &Filter,
        currency_symbol: &str,
    ) -> Self {
        let totals = SummaryService::totals(store);
        let breakdown = match filter {
            Filter::All => None,
            Filter::Income(id) => SummaryService::income_breakdown(store, id, month),
        };

        let (incomes, expenses, balance) = match &breakdown {
            Some(detail) => (
                vec![IncomeRow::new(&detail.income, currency_symbol)],
                detail
                    .linked_expenses
                    .iter()
                    .map(|entry| ExpenseRow::new(entry, currency_symbol))
                    .collect(),
                detail.remaining,
            ),
            None => (
                SummaryService::incomes_by_next_payment(&store.incomes, month)
                    .iter()
                    .map(|scheduled| IncomeRow::new(scheduled, currency_symbol))
                    .collect(),
                SummaryService::expenses_by_amount(store)
                    .iter()
                    .map(|entry| ExpenseRow::new(entry, currency_symbol))
                    .collect(),
                totals.balance,
            ),
        };

        Self {
            month: *month,
            currency_symbol: currency_symbol.to_string(),
            selected_income: breakdown
                .as_ref()
                .map(|detail| detail.income.income.id.clone()),
            total_income: totals.monthly_income,
            total_expenses: totals.expenses,
            balance,
            balance_text: format_money(balance, currency_symbol),
            incomes,
            expenses,
            forecast: SummaryService::forecast_table(store),
            filters: SummaryService::filter_summaries(store),
            balance_series: store_balance_series(store, month.days_in_month),
            breakdown,
        }
    }

    /// Pretty JSON for front ends that consume the view as a document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
