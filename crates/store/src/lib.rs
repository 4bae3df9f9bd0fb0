//! Store traits, in-memory engine, and aggregation services for Stockbook.
//!
//! The engine is store-agnostic: `crates/core` holds the business rules and
//! this crate defines the transactional surface they run against, plus an
//! in-memory engine used in tests, tooling, and embedded deployments.
//!
//! # Modules
//!
//! - `ledger` - The `StockLedger` trait (batches, serialized units, value)
//! - `sales` - The `SalesStore` trait and period sales aggregation
//! - `expenses` - The `ExpenseStore` trait and expense aggregation
//! - `memory` - In-memory engine implementing all three traits
//! - `reporting` - Statement building and period comparison over the stores

pub mod expenses;
pub mod ledger;
pub mod memory;
pub mod reporting;
pub mod sales;

pub use expenses::{ExpenseAggregator, ExpenseStore};
pub use ledger::StockLedger;
pub use memory::InMemoryStore;
pub use reporting::ReportingService;
pub use sales::{SalesAggregator, SalesStore};
