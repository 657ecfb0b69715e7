//! The in-memory snapshot of every income and expense.

use serde::{Deserialize, Serialize};

use crate::{
    expense::{Expense, ExpenseKind},
    income::{Frequency, Income},
};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Single source of truth for incomes and both expense collections.
///
/// Collections keep insertion order; every derived view is recomputed from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceStore {
    #[serde(default = "FinanceStore::schema_version_default")]
    pub schema_version: u32,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub fixed_expenses: Vec<Expense>,
    #[serde(default)]
    pub variable_expenses: Vec<Expense>,
}

impl Default for FinanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FinanceStore {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            incomes: Vec::new(),
            fixed_expenses: Vec::new(),
            variable_expenses: Vec::new(),
        }
    }

    /// Starter data offered when nothing has been saved yet.
    pub fn sample() -> Self {
        let mut store = Self::new();
        store.add_income(Income::new("Salary", 50_000.0, Frequency::Monthly, 5));
        store.add_income(Income::new("Advance", 20_000.0, Frequency::Monthly, 20));
        store.add_expense(ExpenseKind::Fixed, Expense::new("Rent", 20_000.0, 5));
        store.add_expense(ExpenseKind::Variable, Expense::new("Groceries", 10_000.0, 10));
        store
    }

    pub fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.fixed_expenses.is_empty() && self.variable_expenses.is_empty()
    }

    pub fn add_income(&mut self, income: Income) -> String {
        let id = income.id.clone();
        self.incomes.push(income);
        id
    }

    pub fn add_expense(&mut self, kind: ExpenseKind, expense: Expense) -> String {
        let id = expense.id.clone();
        self.expenses_mut(kind).push(expense);
        id
    }

    pub fn income(&self, id: &str) -> Option<&Income> {
        self.incomes.iter().find(|income| income.id == id)
    }

    pub fn income_mut(&mut self, id: &str) -> Option<&mut Income> {
        self.incomes.iter_mut().find(|income| income.id == id)
    }

    pub fn expenses(&self, kind: ExpenseKind) -> &[Expense] {
        match kind {
            ExpenseKind::Fixed => &self.fixed_expenses,
            ExpenseKind::Variable => &self.variable_expenses,
        }
    }

    pub fn expenses_mut(&mut self, kind: ExpenseKind) -> &mut Vec<Expense> {
        match kind {
            ExpenseKind::Fixed => &mut self.fixed_expenses,
            ExpenseKind::Variable => &mut self.variable_expenses,
        }
    }

    pub fn expense(&self, kind: ExpenseKind, id: &str) -> Option<&Expense> {
        self.expenses(kind).iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, kind: ExpenseKind, id: &str) -> Option<&mut Expense> {
        self.expenses_mut(kind)
            .iter_mut()
            .find(|expense| expense.id == id)
    }

    /// Locates an expense in either collection, fixed expenses first.
    pub fn find_expense(&self, id: &str) -> Option<(ExpenseKind, &Expense)> {
        [ExpenseKind::Fixed, ExpenseKind::Variable]
            .into_iter()
            .find_map(|kind| self.expense(kind, id).map(|expense| (kind, expense)))
    }

    /// Fixed expenses followed by variable expenses, each in insertion order.
    pub fn all_expenses(&self) -> impl Iterator<Item = &Expense> + '_ {
        self.fixed_expenses.iter().chain(self.variable_expenses.iter())
    }

    /// Like [`FinanceStore::all_expenses`] but tagged with the owning collection.
    pub fn all_expenses_with_kind(&self) -> impl Iterator<Item = (ExpenseKind, &Expense)> + '_ {
        self.fixed_expenses
            .iter()
            .map(|expense| (ExpenseKind::Fixed, expense))
            .chain(
                self.variable_expenses
                    .iter()
                    .map(|expense| (ExpenseKind::Variable, expense)),
            )
    }

    pub fn expense_count(&self) -> usize {
        self.fixed_expenses.len() + self.variable_expenses.len()
    }
}
