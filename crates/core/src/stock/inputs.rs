//! Stock ledger operation inputs and the adjustment audit record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{AdjustmentId, ItemId, PurchaseId, SaleLineId};

/// Input for receiving a new batch at goods receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveBatch {
    /// The catalog item the batch belongs to.
    pub item_id: ItemId,
    /// Caller-supplied batch number, unique per item.
    pub batch_number: String,
    /// The purchase receipt creating this batch.
    pub purchase_id: PurchaseId,
    /// Quantity purchased.
    pub purchase_qty: i64,
    /// Cost per unit.
    pub unit_cost: Decimal,
    /// Selling price per unit.
    pub selling_price: Decimal,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Optional expiry date.
    pub expiry_date: Option<NaiveDate>,
}

/// Input for taking in one serialized unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveSerializedUnit {
    /// The catalog item this unit is an instance of.
    pub item_id: ItemId,
    /// Globally unique serial number.
    pub serial_number: String,
    /// The purchase receipt that brought this unit in.
    pub purchase_id: PurchaseId,
    /// Cost of this physical unit.
    pub unit_cost: Decimal,
    /// Date the unit was received.
    pub received_at: NaiveDate,
}

/// Input for consuming batch stock for a sale line.
///
/// The idempotency key is the sale-line identity; a retried request carrying
/// a key the ledger already applied is answered with the current batch
/// instead of decrementing twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumeRequest {
    /// The item being sold.
    pub item_id: ItemId,
    /// The batch to consume from.
    pub batch_number: String,
    /// Quantity to consume.
    pub qty: i64,
    /// Caller-supplied idempotency key for safe retries.
    pub idempotency_key: Option<SaleLineId>,
}

/// Input for consuming a serialized unit for a sale line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumeSerialRequest {
    /// Serial number of the unit being sold.
    pub serial_number: String,
    /// Caller-supplied idempotency key for safe retries.
    pub idempotency_key: Option<SaleLineId>,
}

/// Input for a manual, non-sale stock adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustStock {
    /// The item whose batch is adjusted.
    pub item_id: ItemId,
    /// The batch to adjust.
    pub batch_number: String,
    /// Signed quantity change: positive re-adds, negative writes off.
    pub delta_qty: i64,
    /// Why the adjustment was made (damage, loss, correction, ...).
    pub reason: String,
}

/// Audit record written for every applied adjustment. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// Unique identifier.
    pub id: AdjustmentId,
    /// The item whose batch was adjusted.
    pub item_id: ItemId,
    /// The adjusted batch.
    pub batch_number: String,
    /// Signed quantity change applied.
    pub delta_qty: i64,
    /// Recorded reason.
    pub reason: String,
    /// When the adjustment was applied.
    pub recorded_at: DateTime<Utc>,
}
