//! Inventory cost-ledger rules.
//!
//! This module implements the quantity and cost-basis rules for stock:
//! - Batch records (grouped units with one cost) and their state machine
//! - Serialized units (individually tracked items with captured cost)
//! - Pure consume/restore/adjust transitions
//! - Operation inputs and the adjustment audit record
//! - Error types for ledger operations

pub mod batch;
pub mod error;
pub mod inputs;
pub mod serial;

#[cfg(test)]
mod batch_props;

pub use batch::{BatchState, StockBatch};
pub use error::StockError;
pub use inputs::{
    AdjustStock, ConsumeRequest, ConsumeSerialRequest, ReceiveBatch, ReceiveSerializedUnit,
    StockAdjustment,
};
pub use serial::{SerializedUnit, UnitStatus};
