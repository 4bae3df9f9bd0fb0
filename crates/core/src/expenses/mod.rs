//! Operating expense categorization and summarization.

pub mod summary;
pub mod types;

pub use summary::{CategoryTotal, ExpenseService, ExpenseSummary};
pub use types::{ExpenseCategory, ExpenseRecord};
