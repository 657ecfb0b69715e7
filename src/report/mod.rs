//! Plain-data views over the calculator output, ready for any front end.

pub mod dashboard;
pub mod format;
pub mod table;

pub use dashboard::{Dashboard, ExpenseRow, IncomeRow};
pub use format::{day_word, format_amount, format_money, payment_badge};
pub use table::render_forecast_table;
