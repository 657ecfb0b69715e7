#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use kopilka::{
    config::ConfigManager,
    services::FixedClock,
    storage::{JsonSnapshotStorage, DEFAULT_STORAGE_KEY},
    FinanceManager,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn fixed_clock(year: i32, month: u32, day: u32) -> Box<FixedClock> {
    Box::new(FixedClock::new(
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
    ))
}

/// Opens a manager over file storage in `base/data`, with the clock pinned to `date`.
pub fn open_manager(base: &Path, date: (i32, u32, u32)) -> FinanceManager {
    let storage = JsonSnapshotStorage::in_dir(base.join("data"), DEFAULT_STORAGE_KEY)
        .expect("create json storage backend");
    FinanceManager::open(Box::new(storage), fixed_clock(date.0, date.1, date.2))
        .expect("open manager")
}

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (FinanceManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let manager = open_manager(&base, (2024, 6, 10));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (manager, config_manager, base)
}
