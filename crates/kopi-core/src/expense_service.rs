//! Commands that create, edit and delete expenses.

use tracing::{info, warn};

use kopi_domain::{
    generate_id, normalize_amount, parse_amount, parse_payment_day, Expense, ExpenseKind,
    FinanceStore,
};

use crate::{
    error::{CoreError, ServiceResult},
    income_service::validate_record,
};

/// User input for creating (no id) or editing (existing id) an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub id: Option<String>,
    pub kind: ExpenseKind,
    pub name: String,
    pub amount: f64,
    /// Empty for an unlinked expense.
    pub income_id: String,
    pub payment_day: i64,
}

impl ExpenseDraft {
    pub fn new(kind: ExpenseKind, name: impl Into<String>, amount: f64, payment_day: i64) -> Self {
        Self {
            id: None,
            kind,
            name: name.into(),
            amount,
            income_id: String::new(),
            payment_day,
        }
    }

    /// Builds a draft from raw form fields. An empty id means "new expense".
    pub fn from_form(
        id: &str,
        kind: ExpenseKind,
        name: &str,
        amount: &str,
        income_id: &str,
        payment_day: &str,
    ) -> Self {
        let id = id.trim();
        Self {
            id: (!id.is_empty()).then(|| id.to_string()),
            kind,
            name: name.to_string(),
            amount: parse_amount(amount),
            income_id: income_id.trim().to_string(),
            payment_day: parse_payment_day(payment_day),
        }
    }

    pub fn linked_to(mut self, income_id: impl Into<String>) -> Self {
        self.income_id = income_id.into();
        self
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Provides validated create/edit/delete helpers for both expense collections.
pub struct ExpenseService;

impl ExpenseService {
    /// Creates or replaces an expense in the draft's collection and returns its identifier.
    ///
    /// A dangling `income_id` is accepted; links are only cleaned up when an income is deleted.
    pub fn save(store: &mut FinanceStore, draft: ExpenseDraft) -> ServiceResult<String> {
        let name = validate_record(&draft.name, draft.payment_day, "expense")?;
        let kind = draft.kind;
        let record = Expense {
            id: draft.id.clone().unwrap_or_else(generate_id),
            name,
            amount: normalize_amount(draft.amount),
            income_id: draft.income_id,
            payment_day: draft.payment_day as u32,
        };

        match draft.id {
            Some(id) => {
                let slot = store.expense_mut(kind, &id).ok_or_else(|| {
                    warn!(expense_id = %id, %kind, "edit aborted: expense not found");
                    CoreError::ExpenseNotFound(id.clone())
                })?;
                *slot = record;
                info!(expense_id = %id, %kind, "expense updated");
                Ok(id)
            }
            None => {
                let id = store.add_expense(kind, record);
                info!(expense_id = %id, %kind, "expense added");
                Ok(id)
            }
        }
    }

    /// Deletes an expense from whichever collection holds it, fixed expenses first.
    pub fn remove(store: &mut FinanceStore, id: &str) -> ServiceResult<(ExpenseKind, Expense)> {
        let kind = store.find_expense(id).map(|(kind, _)| kind).ok_or_else(|| {
            warn!(expense_id = %id, "delete aborted: expense not found");
            CoreError::ExpenseNotFound(id.to_string())
        })?;
        let expense = Self::remove_from(store, kind, id)?;
        Ok((kind, expense))
    }

    /// Deletes an expense from one specific collection.
    pub fn remove_from(store: &mut FinanceStore, kind: ExpenseKind, id: &str) -> ServiceResult<Expense> {
        let expenses = store.expenses_mut(kind);
        let index = expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| {
                warn!(expense_id = %id, %kind, "delete aborted: expense not found");
                CoreError::ExpenseNotFound(id.to_string())
            })?;
        let removed = expenses.remove(index);
        info!(expense_id = %id, %kind, "expense removed");
        Ok(removed)
    }
}
