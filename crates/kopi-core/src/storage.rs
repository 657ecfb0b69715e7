use std::collections::HashSet;

use kopi_domain::{ExpenseKind, FinanceStore, Identifiable};

use crate::CoreError;

/// Result of reading a persisted snapshot, including any schema upgrade that ran.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub store: FinanceStore,
    /// Human-readable steps applied while upgrading, e.g. `"v0 -> v1"`.
    pub migrations: Vec<String>,
    pub warnings: Vec<String>,
    /// Version found on disk before any upgrade.
    pub schema_version: u32,
}

/// Abstraction over persistence backends capable of storing one finance snapshot.
pub trait SnapshotStorage: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<LoadReport>, CoreError>;
    fn save(&self, store: &FinanceStore) -> Result<(), CoreError>;
}

/// Detects dangling income links and repeated ids within a snapshot.
pub fn snapshot_warnings(store: &FinanceStore) -> Vec<String> {
    let income_ids: HashSet<_> = store.incomes.iter().map(|income| income.id.as_str()).collect();
    let mut warnings = Vec::new();

    for (kind, expense) in store.all_expenses_with_kind() {
        if let Some(income_id) = expense.linked_income() {
            if !income_ids.contains(income_id) {
                warnings.push(format!(
                    "{} expense {} references unknown income {}",
                    kind, expense.id, income_id
                ));
            }
        }
    }
    duplicate_ids("income", &store.incomes, &mut warnings);
    for kind in [ExpenseKind::Fixed, ExpenseKind::Variable] {
        duplicate_ids(&format!("{} expense", kind), store.expenses(kind), &mut warnings);
    }
    warnings
}

/// Ids are unique per collection; the same id in two collections is fine.
fn duplicate_ids<T: Identifiable>(what: &str, records: &[T], warnings: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            warnings.push(format!("duplicate {} id {}", what, record.id()));
        }
    }
}
