//! kopi-domain
//!
//! Pure domain models (Income, Expense, FinanceStore) and the value helpers they share.
//! No I/O, no clock, no storage. Only data types and core enums.

pub mod common;
pub mod expense;
pub mod income;
pub mod store;

pub use common::*;
pub use expense::*;
pub use income::*;
pub use store::*;
