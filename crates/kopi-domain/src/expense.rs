//! Domain types representing fixed and variable expenses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Which of the two expense collections a record lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Fixed,
    Variable,
}

impl ExpenseKind {
    /// Payment day assumed for records saved before payment days existed.
    pub fn default_payment_day(self) -> u32 {
        match self {
            ExpenseKind::Fixed => 5,
            ExpenseKind::Variable => 10,
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseKind::Fixed => "fixed",
            ExpenseKind::Variable => "variable",
        };
        f.write_str(label)
    }
}

/// A monthly expense, optionally paid out of a specific income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Empty when the expense is not linked to an income.
    #[serde(default)]
    pub income_id: String,
    pub payment_day: u32,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64, payment_day: u32) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            amount: normalize_amount(amount),
            income_id: String::new(),
            payment_day,
        }
    }

    /// Links the expense to `income_id`.
    pub fn linked_to(mut self, income_id: impl Into<String>) -> Self {
        self.income_id = income_id.into();
        self
    }

    /// Returns the linked income identifier, if any.
    pub fn linked_income(&self) -> Option<&str> {
        if self.income_id.is_empty() {
            None
        } else {
            Some(&self.income_id)
        }
    }

    pub fn is_linked_to(&self, income_id: &str) -> bool {
        !income_id.is_empty() && self.income_id == income_id
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Scheduled for Expense {
    fn payment_day(&self) -> u32 {
        self.payment_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_expense_has_no_income() {
        let expense = Expense::new("Rent", 900.0, 5);
        assert_eq!(expense.linked_income(), None);
        assert!(!expense.is_linked_to(""));
    }

    #[test]
    fn linked_expense_reports_income() {
        let expense = Expense::new("Rent", 900.0, 5).linked_to("inc-1");
        assert_eq!(expense.linked_income(), Some("inc-1"));
        assert!(expense.is_linked_to("inc-1"));
        assert!(!expense.is_linked_to("inc-2"));
    }

    #[test]
    fn default_days_differ_per_kind() {
        assert_eq!(ExpenseKind::Fixed.default_payment_day(), 5);
        assert_eq!(ExpenseKind::Variable.default_payment_day(), 10);
    }
}
