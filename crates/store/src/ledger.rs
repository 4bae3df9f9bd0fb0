//! The stock ledger store surface.

use async_trait::async_trait;
use rust_decimal::Decimal;
use stockbook_core::stock::{
    AdjustStock, ConsumeRequest, ConsumeSerialRequest, ReceiveBatch, ReceiveSerializedUnit,
    SerializedUnit, StockAdjustment, StockBatch, StockError,
};
use stockbook_shared::types::ItemId;

/// Source of truth for inventory quantity and cost basis.
///
/// Every method may block on data-store I/O; callers must not hold any
/// in-process lock across a call. Mutations against the same batch or
/// serial are linearizable: implementations perform check-and-decrement in
/// one transactional step, so two concurrent sales can never both take the
/// last unit.
///
/// All operations are safe to retry on timeout except [`consume`] and
/// [`consume_serial`], which take a caller-supplied idempotency key for
/// that purpose.
///
/// [`consume`]: StockLedger::consume
/// [`consume_serial`]: StockLedger::consume_serial
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Receives a new batch at goods receipt.
    ///
    /// Stamps `before_purchase_available_qty` from the item's other batches
    /// in the same transaction as the insert. With engines that cannot
    /// serialize the snapshot against concurrent sales, the stamped value is
    /// approximate as of receipt time; it is informational, not
    /// safety-critical.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` if the item does not resolve, `DuplicateBatch` if the
    /// `(item, batch number)` pair exists, plus input validation errors.
    async fn receive_batch(&self, input: ReceiveBatch) -> Result<StockBatch, StockError>;

    /// Takes in one serialized unit.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` if the item does not resolve, `DuplicateSerial` if the
    /// serial number already exists globally.
    async fn receive_serialized_unit(
        &self,
        input: ReceiveSerializedUnit,
    ) -> Result<SerializedUnit, StockError>;

    /// Atomically consumes batch stock for a sale line and returns the
    /// updated batch.
    ///
    /// # Errors
    ///
    /// `InsufficientStock` (reporting batch, requested, and available
    /// quantities) with no mutation when the batch cannot cover the request;
    /// `BatchNotFound` when the batch does not exist.
    async fn consume(&self, request: ConsumeRequest) -> Result<StockBatch, StockError>;

    /// Atomically consumes one serialized unit.
    ///
    /// # Errors
    ///
    /// `AlreadySold` if the unit has no remaining availability,
    /// `SerialNotFound` if it does not exist.
    async fn consume_serial(
        &self,
        request: ConsumeSerialRequest,
    ) -> Result<SerializedUnit, StockError>;

    /// Returns previously consumed units to a batch (sale reversal).
    ///
    /// # Errors
    ///
    /// `NothingToRestore` when more is restored than was sold.
    async fn restore(
        &self,
        item_id: ItemId,
        batch_number: &str,
        qty: i64,
    ) -> Result<StockBatch, StockError>;

    /// Makes a sold serialized unit available again (sale reversal).
    ///
    /// # Errors
    ///
    /// `SerialNotSold` when the unit is not currently sold.
    async fn restore_serial(&self, serial_number: &str) -> Result<SerializedUnit, StockError>;

    /// Applies a manual adjustment and writes its audit record.
    ///
    /// # Errors
    ///
    /// `InsufficientStock` if availability would go negative,
    /// `ExceedsBatchCapacity` if it would exceed the purchased quantity.
    async fn adjust(&self, input: AdjustStock) -> Result<StockBatch, StockError>;

    /// Current inventory valuation at cost: sum of `available_qty *
    /// unit_cost` across all batches, optionally restricted to some items.
    async fn current_value(&self, items: Option<&[ItemId]>) -> Result<Decimal, StockError>;

    /// Looks up one batch by identity.
    async fn batch(
        &self,
        item_id: ItemId,
        batch_number: &str,
    ) -> Result<Option<StockBatch>, StockError>;

    /// All batches of one item, including exhausted ones.
    async fn batches_for_item(&self, item_id: ItemId) -> Result<Vec<StockBatch>, StockError>;

    /// Looks up one serialized unit by serial number, sold or not.
    async fn serial_unit(&self, serial_number: &str) -> Result<Option<SerializedUnit>, StockError>;

    /// Total available quantity of one item across its batches.
    ///
    /// Read path for the stock-alert collaborator; never writes.
    async fn available_quantity(&self, item_id: ItemId) -> Result<i64, StockError>;

    /// Audit trail of manual adjustments against one batch.
    async fn adjustments(
        &self,
        item_id: ItemId,
        batch_number: &str,
    ) -> Result<Vec<StockAdjustment>, StockError>;
}
