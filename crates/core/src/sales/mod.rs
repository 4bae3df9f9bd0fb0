//! Read-only sale records and period sales totals.
//!
//! The sales subsystem owns sale/invoice records; this engine only reads
//! them to aggregate revenue and cost of goods sold.

pub mod types;

pub use types::{ReturnStatus, Sale, SaleStatus, SalesTotals};
