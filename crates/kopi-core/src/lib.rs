//! kopi-core
//!
//! Finance calculator and command services for Kopilka.
//! Depends on kopi-domain. No rendering, no terminal I/O, no direct storage interactions.

pub mod balance_series;
pub mod countdown;
pub mod error;
pub mod expense_service;
pub mod frequency;
pub mod income_service;
pub mod storage;
pub mod summary_service;
pub mod time;


pub use balance_series::*;
pub use countdown::*;
pub use error::{CoreError, ServiceResult};
pub use expense_service::*;
pub use frequency::*;
pub use income_service::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
