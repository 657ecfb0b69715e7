#![doc(test(attr(deny(warnings))))]

//! Kopilka tracks incomes and expenses, projects the balance forward and keeps
//! everything in a single JSON snapshot.

pub mod core;
pub mod errors;
pub mod report;
pub mod utils;

pub use kopi_config as config;
pub use kopi_core as services;
pub use kopi_domain as domain;
pub use kopi_storage_json as storage;

pub use crate::core::{FinanceManager, LoadMetadata, LoadSource};
pub use errors::{KopilkaError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with_filter(None);
}

/// Same as [`init`], taking the fallback filter from `config.log_filter`.
pub fn init_from_config(config: &config::Config) {
    init_with_filter(config.log_filter.as_deref());
}

/// Same as [`init`], with an explicit fallback filter.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git = build.git_hash,
            status = build.git_status,
            built = build.timestamp,
            target = build.target,
            profile = build.profile,
            "Kopilka tracing initialized."
        );
    });
}
