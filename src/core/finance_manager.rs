use tracing::{info, warn};

use kopi_config::{Config, ConfigManager};
use kopi_core::{
    Clock, ExpenseDraft, ExpenseService, Filter, IncomeDraft, IncomeRemoval,
    IncomeService, LoadReport, MonthContext, SnapshotStorage, SystemClock,
};
use kopi_domain::{Expense, ExpenseKind, FinanceStore, CURRENT_SCHEMA_VERSION};
use kopi_storage_json::JsonSnapshotStorage;

use crate::errors::{KopilkaError, Result};
use crate::report::Dashboard;

/// Where the in-memory store came from when the manager was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Snapshot,
    /// Nothing was stored; sample data was seeded and not yet persisted.
    Sample,
}

/// Metadata describing the outcome of the initial load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMetadata {
    pub source: LoadSource,
    pub warnings: Vec<String>,
    pub migrations: Vec<String>,
    pub schema_version: u32,
}

/// Owns the finance store and keeps it mirrored to storage after every command.
pub struct FinanceManager {
    store: FinanceStore,
    storage: Box<dyn SnapshotStorage>,
    clock: Box<dyn Clock>,
    currency_symbol: String,
    last_load: LoadMetadata,
}

impl FinanceManager {
    /// Loads the stored snapshot, or seeds sample data when nothing is stored.
    pub fn open(storage: Box<dyn SnapshotStorage>, clock: Box<dyn Clock>) -> Result<Self> {
        let (store, last_load) = match storage.load().map_err(KopilkaError::Storage)? {
            Some(report) => apply_load(report),
            None => {
                info!("no stored snapshot; seeding sample data");
                (
                    FinanceStore::sample(),
                    LoadMetadata {
                        source: LoadSource::Sample,
                        warnings: Vec::new(),
                        migrations: Vec::new(),
                        schema_version: CURRENT_SCHEMA_VERSION,
                    },
                )
            }
        };

        Ok(Self {
            store,
            storage,
            clock,
            currency_symbol: Config::default_currency_symbol(),
            last_load,
        })
    }

    /// Symbol appended to formatted amounts in dashboards.
    pub fn with_currency_symbol(mut self, currency_symbol: impl Into<String>) -> Self {
        self.currency_symbol = currency_symbol.into();
        self
    }

    /// Opens file-backed storage in the directory named by `config`.
    pub fn open_with_config(manager: &ConfigManager, config: &Config) -> Result<Self> {
        let storage = JsonSnapshotStorage::in_dir(manager.data_dir(config), config.storage_key.clone())
            .map_err(KopilkaError::Storage)?;
        Ok(Self::open(Box::new(storage), Box::new(SystemClock))?
            .with_currency_symbol(config.currency_symbol.as_str()))
    }

    pub fn store(&self) -> &FinanceStore {
        &self.store
    }

    pub fn last_load(&self) -> &LoadMetadata {
        &self.last_load
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn storage(&self) -> &dyn SnapshotStorage {
        self.storage.as_ref()
    }

    /// The month context of "today" according to the manager's clock.
    pub fn month(&self) -> MonthContext {
        MonthContext::from_clock(self.clock.as_ref())
    }

    pub fn dashboard(&self, filter: &Filter) -> Dashboard {
        Dashboard::build(&self.store, &self.month(), filter, &self.currency_symbol)
    }

    pub fn save_income(&mut self, draft: IncomeDraft) -> Result<String> {
        let id = IncomeService::save(&mut self.store, draft)?;
        self.persist()?;
        Ok(id)
    }

    /// Deletes an income together with every expense linked to it.
    pub fn remove_income(&mut self, id: &str) -> Result<IncomeRemoval> {
        let removal = IncomeService::remove(&mut self.store, id)?;
        self.persist()?;
        Ok(removal)
    }

    pub fn save_expense(&mut self, draft: ExpenseDraft) -> Result<String> {
        let id = ExpenseService::save(&mut self.store, draft)?;
        self.persist()?;
        Ok(id)
    }

    pub fn remove_expense(&mut self, id: &str) -> Result<(ExpenseKind, Expense)> {
        let removed = ExpenseService::remove(&mut self.store, id)?;
        self.persist()?;
        Ok(removed)
    }

    /// Writes the current store to storage.
    pub fn persist(&self) -> Result<()> {
        self.storage.save(&self.store).map_err(|err| {
            warn!(error = %err, "failed to persist snapshot");
            KopilkaError::Storage(err)
        })
    }
}

fn apply_load(report: LoadReport) -> (FinanceStore, LoadMetadata) {
    let LoadReport {
        store,
        migrations,
        warnings,
        schema_version,
    } = report;
    info!(
        incomes = store.incomes.len(),
        expenses = store.expense_count(),
        schema_version,
        migrated = !migrations.is_empty(),
        "snapshot loaded"
    );
    (
        store,
        LoadMetadata {
            source: LoadSource::Snapshot,
            warnings,
            migrations,
            schema_version,
        },
    )
}
