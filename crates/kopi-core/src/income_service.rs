//! Commands that create, edit and delete incomes.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kopi_domain::{
    generate_id, is_valid_payment_day, normalize_amount, parse_amount, parse_payment_day, Expense,
    Frequency, FinanceStore, Income,
};

use crate::error::{CoreError, ServiceResult};

/// User input for creating (no id) or editing (existing id) an income.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeDraft {
    pub id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub payment_day: i64,
}

impl IncomeDraft {
    pub fn new(name: impl Into<String>, amount: f64, frequency: Frequency, payment_day: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount,
            frequency,
            payment_day,
        }
    }

    /// Builds a draft from raw form fields. An empty id means "new income".
    pub fn from_form(id: &str, name: &str, amount: &str, frequency: &str, payment_day: &str) -> Self {
        let id = id.trim();
        Self {
            id: (!id.is_empty()).then(|| id.to_string()),
            name: name.to_string(),
            amount: parse_amount(amount),
            frequency: Frequency::parse_lenient(frequency),
            payment_day: parse_payment_day(payment_day),
        }
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Outcome of deleting an income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRemoval {
    pub income: Income,
    pub removed_expenses: Vec<Expense>,
}

/// Provides validated create/edit/delete helpers for incomes.
pub struct IncomeService;

impl IncomeService {
    /// Creates or edits an income and returns its identifier.
    pub fn save(store: &mut FinanceStore, draft: IncomeDraft) -> ServiceResult<String> {
        let name = validate_record(&draft.name, draft.payment_day, "income")?;
        let payment_day = draft.payment_day as u32;
        let amount = normalize_amount(draft.amount);

        match draft.id {
            Some(id) => {
                let income = store.income_mut(&id).ok_or_else(|| {
                    warn!(income_id = %id, "edit aborted: income not found");
                    CoreError::IncomeNotFound(id.clone())
                })?;
                income.name = name;
                income.amount = amount;
                income.frequency = draft.frequency;
                income.payment_day = payment_day;
                info!(income_id = %id, "income updated");
                Ok(id)
            }
            None => {
                let id = store.add_income(Income {
                    id: generate_id(),
                    name,
                    amount,
                    frequency: draft.frequency,
                    payment_day,
                });
                info!(income_id = %id, "income added");
                Ok(id)
            }
        }
    }

    /// Deletes an income together with every expense linked to it.
    pub fn remove(store: &mut FinanceStore, id: &str) -> ServiceResult<IncomeRemoval> {
        let index = store
            .incomes
            .iter()
            .position(|income| income.id == id)
            .ok_or_else(|| {
                warn!(income_id = %id, "delete aborted: income not found");
                CoreError::IncomeNotFound(id.to_string())
            })?;

        let mut removed_expenses = Vec::new();
        for expenses in [&mut store.fixed_expenses, &mut store.variable_expenses] {
            let (linked, kept): (Vec<_>, Vec<_>) = std::mem::take(expenses)
                .into_iter()
                .partition(|expense| expense.is_linked_to(id));
            *expenses = kept;
            removed_expenses.extend(linked);
        }
        let income = store.incomes.remove(index);
        info!(
            income_id = %id,
            linked = removed_expenses.len(),
            "income removed with linked expenses"
        );
        Ok(IncomeRemoval {
            income,
            removed_expenses,
        })
    }
}

/// Checks the fields shared by income and expense forms and returns the trimmed name.
pub(crate) fn validate_record(name: &str, payment_day: i64, what: &str) -> ServiceResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{what} name is required")));
    }
    if !is_valid_payment_day(payment_day) {
        return Err(CoreError::Validation(
            "payment day must be between 1 and 31".into(),
        ));
    }
    Ok(trimmed.to_string())
}
