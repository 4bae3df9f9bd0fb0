//! Cost resolution for sold line items.
//!
//! Given a sale line, this module computes its cost contribution to COGS
//! by identity lookup (serial number or batch number), never by remaining
//! balance: cost at time of sale is an immutable historical fact and must
//! not move when availability is later adjusted.

pub mod resolver;
pub mod types;

pub use resolver::CostResolver;
pub use types::{CostSource, LineCost, SaleLineItem};
