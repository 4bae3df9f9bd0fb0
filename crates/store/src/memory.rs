//! In-memory store engine.
//!
//! One `RwLock` guards every record set: mutations take the write guard, so
//! consume/adjust are linearizable and the receipt snapshot is
//! transactional; aggregation reads take one read guard and therefore see a
//! fully committed set of records. No guard is ever held across an await.
//!
//! Used in tests, tooling, and embedded deployments; durable engines
//! implement the same traits against their own transaction scopes.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use stockbook_core::expenses::ExpenseRecord;
use stockbook_core::reports::DateRange;
use stockbook_core::sales::Sale;
use stockbook_core::stock::{
    AdjustStock, ConsumeRequest, ConsumeSerialRequest, ReceiveBatch, ReceiveSerializedUnit,
    SerializedUnit, StockAdjustment, StockBatch, StockError,
};
use stockbook_shared::config::LedgerConfig;
use stockbook_shared::types::{AdjustmentId, CompanyId, ItemId, SaleLineId};
use stockbook_shared::{AppError, AppResult};

use crate::expenses::ExpenseStore;
use crate::ledger::StockLedger;
use crate::sales::SalesStore;

/// A consume already applied under a caller-supplied idempotency key.
///
/// Serial consumes are scoped per `(line, serial)`: one sale line may
/// consume several serialized units and each must decrement exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AppliedKey {
    Batch(SaleLineId),
    Serial(SaleLineId, String),
}

#[derive(Debug, Default)]
struct StoreState {
    items: HashSet<ItemId>,
    batches: HashMap<(ItemId, String), StockBatch>,
    serials: HashMap<String, SerializedUnit>,
    adjustments: Vec<StockAdjustment>,
    sales: Vec<Sale>,
    expenses: Vec<ExpenseRecord>,
    applied_keys: HashSet<AppliedKey>,
    applied_order: VecDeque<AppliedKey>,
}

/// In-memory engine implementing the ledger, sales, and expense stores.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    idempotency_log_cap: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&LedgerConfig::default())
    }

    /// Creates an empty store with the given ledger configuration.
    #[must_use]
    pub fn with_config(config: &LedgerConfig) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            idempotency_log_cap: config.idempotency_log_cap,
        }
    }

    /// Registers a catalog item so receipts against it resolve.
    ///
    /// Item records are owned by the external catalog subsystem; the store
    /// only keeps the identities it needs to validate receipts.
    pub fn register_item(&self, item_id: ItemId) {
        if let Ok(mut state) = self.state.write() {
            state.items.insert(item_id);
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, StoreState>, StockError> {
        self.state
            .read()
            .map_err(|_| StockError::Store("state lock poisoned".to_string()))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StockError> {
        self.state
            .write()
            .map_err(|_| StockError::Store("state lock poisoned".to_string()))
    }

    fn record_applied_key(&self, state: &mut StoreState, key: AppliedKey) {
        if state.applied_keys.insert(key.clone()) {
            state.applied_order.push_back(key);
            while state.applied_order.len() > self.idempotency_log_cap {
                if let Some(evicted) = state.applied_order.pop_front() {
                    state.applied_keys.remove(&evicted);
                }
            }
        }
    }
}

#[async_trait]
impl StockLedger for InMemoryStore {
    async fn receive_batch(&self, input: ReceiveBatch) -> Result<StockBatch, StockError> {
        let mut state = self.write_state()?;

        if !state.items.contains(&input.item_id) {
            return Err(StockError::ItemNotFound(input.item_id));
        }
        let key = (input.item_id, input.batch_number.clone());
        if state.batches.contains_key(&key) {
            return Err(StockError::DuplicateBatch {
                item_id: input.item_id,
                batch_number: input.batch_number,
            });
        }

        // Compute-and-stamp inside the same critical section as the insert,
        // so the snapshot is exact under this engine.
        let before_purchase_available_qty: i64 = state
            .batches
            .values()
            .filter(|b| b.item_id == input.item_id)
            .map(|b| b.available_qty)
            .sum();

        let batch = StockBatch::receive(input, before_purchase_available_qty)?;
        info!(
            item_id = %batch.item_id,
            batch_number = %batch.batch_number,
            purchase_qty = batch.purchase_qty,
            "batch received"
        );
        state.batches.insert(key, batch.clone());
        Ok(batch)
    }

    async fn receive_serialized_unit(
        &self,
        input: ReceiveSerializedUnit,
    ) -> Result<SerializedUnit, StockError> {
        let mut state = self.write_state()?;

        if !state.items.contains(&input.item_id) {
            return Err(StockError::ItemNotFound(input.item_id));
        }
        if state.serials.contains_key(&input.serial_number) {
            return Err(StockError::DuplicateSerial(input.serial_number));
        }

        let unit = SerializedUnit::receive(input)?;
        info!(
            item_id = %unit.item_id,
            serial_number = %unit.serial_number,
            "serialized unit received"
        );
        state.serials.insert(unit.serial_number.clone(), unit.clone());
        Ok(unit)
    }

    async fn consume(&self, request: ConsumeRequest) -> Result<StockBatch, StockError> {
        let mut state = self.write_state()?;
        let key = (request.item_id, request.batch_number.clone());

        if let Some(idempotency_key) = request.idempotency_key {
            if state.applied_keys.contains(&AppliedKey::Batch(idempotency_key)) {
                // Retried request; the decrement already happened.
                return state
                    .batches
                    .get(&key)
                    .cloned()
                    .ok_or(StockError::BatchNotFound {
                        item_id: request.item_id,
                        batch_number: request.batch_number,
                    });
            }
        }

        let batch = state
            .batches
            .get_mut(&key)
            .ok_or_else(|| StockError::BatchNotFound {
                item_id: request.item_id,
                batch_number: request.batch_number.clone(),
            })?;

        batch.consume_qty(request.qty)?;
        let snapshot = batch.clone();
        debug!(
            item_id = %snapshot.item_id,
            batch_number = %snapshot.batch_number,
            qty = request.qty,
            available = snapshot.available_qty,
            "batch stock consumed"
        );

        if let Some(idempotency_key) = request.idempotency_key {
            self.record_applied_key(&mut state, AppliedKey::Batch(idempotency_key));
        }
        Ok(snapshot)
    }

    async fn consume_serial(
        &self,
        request: ConsumeSerialRequest,
    ) -> Result<SerializedUnit, StockError> {
        let mut state = self.write_state()?;

        if let Some(idempotency_key) = request.idempotency_key {
            let applied =
                AppliedKey::Serial(idempotency_key, request.serial_number.clone());
            if state.applied_keys.contains(&applied) {
                return state
                    .serials
                    .get(&request.serial_number)
                    .cloned()
                    .ok_or(StockError::SerialNotFound(request.serial_number));
            }
        }

        let unit = state
            .serials
            .get_mut(&request.serial_number)
            .ok_or_else(|| StockError::SerialNotFound(request.serial_number.clone()))?;

        unit.mark_sold()?;
        let snapshot = unit.clone();
        debug!(serial_number = %snapshot.serial_number, "serialized unit consumed");

        if let Some(idempotency_key) = request.idempotency_key {
            self.record_applied_key(
                &mut state,
                AppliedKey::Serial(idempotency_key, snapshot.serial_number.clone()),
            );
        }
        Ok(snapshot)
    }

    async fn restore(
        &self,
        item_id: ItemId,
        batch_number: &str,
        qty: i64,
    ) -> Result<StockBatch, StockError> {
        let mut state = self.write_state()?;
        let batch = state
            .batches
            .get_mut(&(item_id, batch_number.to_string()))
            .ok_or_else(|| StockError::BatchNotFound {
                item_id,
                batch_number: batch_number.to_string(),
            })?;

        batch.restore_qty(qty)?;
        debug!(
            item_id = %item_id,
            batch_number = %batch_number,
            qty,
            "batch stock restored"
        );
        Ok(batch.clone())
    }

    async fn restore_serial(&self, serial_number: &str) -> Result<SerializedUnit, StockError> {
        let mut state = self.write_state()?;
        let unit = state
            .serials
            .get_mut(serial_number)
            .ok_or_else(|| StockError::SerialNotFound(serial_number.to_string()))?;

        unit.mark_available()?;
        debug!(serial_number = %serial_number, "serialized unit restored");
        Ok(unit.clone())
    }

    async fn adjust(&self, input: AdjustStock) -> Result<StockBatch, StockError> {
        let mut state = self.write_state()?;
        let key = (input.item_id, input.batch_number.clone());
        let batch = state
            .batches
            .get_mut(&key)
            .ok_or_else(|| StockError::BatchNotFound {
                item_id: input.item_id,
                batch_number: input.batch_number.clone(),
            })?;

        batch.apply_adjustment(input.delta_qty)?;
        let snapshot = batch.clone();
        info!(
            item_id = %input.item_id,
            batch_number = %input.batch_number,
            delta_qty = input.delta_qty,
            reason = %input.reason,
            "stock adjusted"
        );

        // Audit record lands in the same critical section as the mutation.
        state.adjustments.push(StockAdjustment {
            id: AdjustmentId::new(),
            item_id: input.item_id,
            batch_number: input.batch_number,
            delta_qty: input.delta_qty,
            reason: input.reason,
            recorded_at: Utc::now(),
        });

        Ok(snapshot)
    }

    async fn current_value(&self, items: Option<&[ItemId]>) -> Result<Decimal, StockError> {
        let state = self.read_state()?;
        let value = state
            .batches
            .values()
            .filter(|b| items.is_none_or(|ids| ids.contains(&b.item_id)))
            .map(StockBatch::stock_value)
            .sum();
        Ok(value)
    }

    async fn batch(
        &self,
        item_id: ItemId,
        batch_number: &str,
    ) -> Result<Option<StockBatch>, StockError> {
        let state = self.read_state()?;
        Ok(state.batches.get(&(item_id, batch_number.to_string())).cloned())
    }

    async fn batches_for_item(&self, item_id: ItemId) -> Result<Vec<StockBatch>, StockError> {
        let state = self.read_state()?;
        let mut batches: Vec<StockBatch> = state
            .batches
            .values()
            .filter(|b| b.item_id == item_id)
            .cloned()
            .collect();
        batches.sort_by(|a, b| a.batch_number.cmp(&b.batch_number));
        Ok(batches)
    }

    async fn serial_unit(&self, serial_number: &str) -> Result<Option<SerializedUnit>, StockError> {
        let state = self.read_state()?;
        Ok(state.serials.get(serial_number).cloned())
    }

    async fn available_quantity(&self, item_id: ItemId) -> Result<i64, StockError> {
        let state = self.read_state()?;
        Ok(state
            .batches
            .values()
            .filter(|b| b.item_id == item_id)
            .map(|b| b.available_qty)
            .sum())
    }

    async fn adjustments(
        &self,
        item_id: ItemId,
        batch_number: &str,
    ) -> Result<Vec<StockAdjustment>, StockError> {
        let state = self.read_state()?;
        Ok(state
            .adjustments
            .iter()
            .filter(|a| a.item_id == item_id && a.batch_number == batch_number)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SalesStore for InMemoryStore {
    async fn record_sale(&self, sale: Sale) -> AppResult<()> {
        if sale.total_amount < Decimal::ZERO {
            return Err(AppError::Validation(
                "sale total cannot be negative".to_string(),
            ));
        }
        let mut state = self.write_state().map_err(AppError::from)?;
        // The sale and its lines land as one value: committed atomically.
        state.sales.push(sale);
        Ok(())
    }

    async fn sales_in_range(
        &self,
        company_id: CompanyId,
        range: &DateRange,
    ) -> AppResult<Vec<Sale>> {
        let state = self.read_state().map_err(AppError::from)?;
        Ok(state
            .sales
            .iter()
            .filter(|s| s.company_id == company_id && range.contains(s.sale_date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ExpenseStore for InMemoryStore {
    async fn record_expense(&self, expense: ExpenseRecord) -> AppResult<()> {
        if expense.amount < Decimal::ZERO {
            return Err(AppError::Validation(
                "expense amount cannot be negative".to_string(),
            ));
        }
        let mut state = self.write_state().map_err(AppError::from)?;
        state.expenses.push(expense);
        Ok(())
    }

    async fn expenses_in_range(
        &self,
        company_id: CompanyId,
        range: &DateRange,
    ) -> AppResult<Vec<ExpenseRecord>> {
        let state = self.read_state().map_err(AppError::from)?;
        Ok(state
            .expenses
            .iter()
            .filter(|e| e.company_id == company_id && range.contains(e.date))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stockbook_shared::types::PurchaseId;

    fn make_receipt(item_id: ItemId, batch_number: &str, qty: i64) -> ReceiveBatch {
        ReceiveBatch {
            item_id,
            batch_number: batch_number.to_string(),
            purchase_id: PurchaseId::new(),
            purchase_qty: qty,
            unit_cost: dec!(5),
            selling_price: dec!(8),
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            expiry_date: None,
        }
    }

    fn store_with_item() -> (InMemoryStore, ItemId) {
        let store = InMemoryStore::new();
        let item_id = ItemId::new();
        store.register_item(item_id);
        (store, item_id)
    }

    #[tokio::test]
    async fn test_receive_batch_requires_known_item() {
        let store = InMemoryStore::new();
        let result = store.receive_batch(make_receipt(ItemId::new(), "B1", 10)).await;
        assert!(matches!(result, Err(StockError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_receive_batch_rejects_duplicates() {
        let (store, item_id) = store_with_item();
        store.receive_batch(make_receipt(item_id, "B1", 10)).await.unwrap();

        let result = store.receive_batch(make_receipt(item_id, "B1", 5)).await;
        assert!(matches!(result, Err(StockError::DuplicateBatch { .. })));
    }

    #[tokio::test]
    async fn test_same_batch_number_allowed_across_items() {
        let (store, item_a) = store_with_item();
        let item_b = ItemId::new();
        store.register_item(item_b);

        store.receive_batch(make_receipt(item_a, "B1", 10)).await.unwrap();
        store.receive_batch(make_receipt(item_b, "B1", 5)).await.unwrap();

        assert_eq!(store.available_quantity(item_a).await.unwrap(), 10);
        assert_eq!(store.available_quantity(item_b).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_before_purchase_snapshot_sums_other_batches() {
        let (store, item_id) = store_with_item();
        store.receive_batch(make_receipt(item_id, "B1", 10)).await.unwrap();
        store
            .consume(ConsumeRequest {
                item_id,
                batch_number: "B1".to_string(),
                qty: 4,
                idempotency_key: None,
            })
            .await
            .unwrap();

        let second = store.receive_batch(make_receipt(item_id, "B2", 20)).await.unwrap();
        assert_eq!(second.before_purchase_available_qty, 6);

        let third = store.receive_batch(make_receipt(item_id, "B3", 1)).await.unwrap();
        assert_eq!(third.before_purchase_available_qty, 26);
    }

    #[tokio::test]
    async fn test_consume_decrements_until_insufficient() {
        let (store, item_id) = store_with_item();
        store.receive_batch(make_receipt(item_id, "B1", 3)).await.unwrap();

        let request = ConsumeRequest {
            item_id,
            batch_number: "B1".to_string(),
            qty: 2,
            idempotency_key: None,
        };
        let batch = store.consume(request.clone()).await.unwrap();
        assert_eq!(batch.available_qty, 1);

        let err = store.consume(request).await.unwrap_err();
        assert!(matches!(
            err,
            StockError::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_consume_idempotency_key_replays_without_decrement() {
        let (store, item_id) = store_with_item();
        store.receive_batch(make_receipt(item_id, "B1", 10)).await.unwrap();

        let request = ConsumeRequest {
            item_id,
            batch_number: "B1".to_string(),
            qty: 4,
            idempotency_key: Some(SaleLineId::new()),
        };

        let first = store.consume(request.clone()).await.unwrap();
        assert_eq!(first.available_qty, 6);

        // Same key retried: no further decrement.
        let second = store.consume(request).await.unwrap();
        assert_eq!(second.available_qty, 6);
    }

    #[tokio::test]
    async fn test_serial_consume_and_restore() {
        let (store, item_id) = store_with_item();
        store
            .receive_serialized_unit(ReceiveSerializedUnit {
                item_id,
                serial_number: "SN-1".to_string(),
                purchase_id: PurchaseId::new(),
                unit_cost: dec!(120),
                received_at: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            })
            .await
            .unwrap();

        let sold = store
            .consume_serial(ConsumeSerialRequest {
                serial_number: "SN-1".to_string(),
                idempotency_key: None,
            })
            .await
            .unwrap();
        assert!(!sold.is_available());

        let err = store
            .consume_serial(ConsumeSerialRequest {
                serial_number: "SN-1".to_string(),
                idempotency_key: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::AlreadySold(_)));

        let restored = store.restore_serial("SN-1").await.unwrap();
        assert!(restored.is_available());
    }

    #[tokio::test]
    async fn test_serial_idempotency_key_is_scoped_per_serial() {
        let (store, item_id) = store_with_item();
        for serial in ["SN-1", "SN-2"] {
            store
                .receive_serialized_unit(ReceiveSerializedUnit {
                    item_id,
                    serial_number: serial.to_string(),
                    purchase_id: PurchaseId::new(),
                    unit_cost: dec!(80),
                    received_at: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
                })
                .await
                .unwrap();
        }

        // One sale line consuming two units under the same line key: both
        // decrement, and each serial replays independently.
        let line_key = SaleLineId::new();
        for serial in ["SN-1", "SN-2"] {
            let sold = store
                .consume_serial(ConsumeSerialRequest {
                    serial_number: serial.to_string(),
                    idempotency_key: Some(line_key),
                })
                .await
                .unwrap();
            assert!(!sold.is_available());
        }

        let replay = store
            .consume_serial(ConsumeSerialRequest {
                serial_number: "SN-2".to_string(),
                idempotency_key: Some(line_key),
            })
            .await
            .unwrap();
        assert!(!replay.is_available());
    }

    #[tokio::test]
    async fn test_duplicate_serial_rejected_globally() {
        let (store, item_a) = store_with_item();
        let item_b = ItemId::new();
        store.register_item(item_b);

        let intake = |item_id| ReceiveSerializedUnit {
            item_id,
            serial_number: "SN-DUP".to_string(),
            purchase_id: PurchaseId::new(),
            unit_cost: dec!(50),
            received_at: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        };

        store.receive_serialized_unit(intake(item_a)).await.unwrap();
        let result = store.receive_serialized_unit(intake(item_b)).await;
        assert!(matches!(result, Err(StockError::DuplicateSerial(_))));
    }

    #[tokio::test]
    async fn test_adjust_writes_audit_record() {
        let (store, item_id) = store_with_item();
        store.receive_batch(make_receipt(item_id, "B1", 10)).await.unwrap();

        let batch = store
            .adjust(AdjustStock {
                item_id,
                batch_number: "B1".to_string(),
                delta_qty: -3,
                reason: "water damage".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(batch.available_qty, 7);
        assert_eq!(batch.sold_qty, 0);

        let trail = store.adjustments(item_id, "B1").await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].delta_qty, -3);
        assert_eq!(trail[0].reason, "water damage");
    }

    #[tokio::test]
    async fn test_current_value_with_and_without_filter() {
        let (store, item_a) = store_with_item();
        let item_b = ItemId::new();
        store.register_item(item_b);

        store.receive_batch(make_receipt(item_a, "B1", 10)).await.unwrap();
        let mut other = make_receipt(item_b, "B1", 4);
        other.unit_cost = dec!(25);
        store.receive_batch(other).await.unwrap();

        // 10 * 5 + 4 * 25
        assert_eq!(store.current_value(None).await.unwrap(), dec!(150));
        assert_eq!(
            store.current_value(Some(&[item_a])).await.unwrap(),
            dec!(50)
        );
    }

    #[tokio::test]
    async fn test_exhausted_batch_stays_on_record() {
        let (store, item_id) = store_with_item();
        store.receive_batch(make_receipt(item_id, "B1", 2)).await.unwrap();
        store
            .consume(ConsumeRequest {
                item_id,
                batch_number: "B1".to_string(),
                qty: 2,
                idempotency_key: None,
            })
            .await
            .unwrap();

        let batch = store.batch(item_id, "B1").await.unwrap().unwrap();
        assert_eq!(batch.available_qty, 0);
        // Cost stays resolvable for historical reporting.
        assert_eq!(batch.unit_cost, dec!(5));
    }

    #[tokio::test]
    async fn test_record_expense_rejects_negative_amount() {
        use stockbook_core::expenses::{ExpenseCategory, ExpenseRecord};
        use stockbook_shared::types::ExpenseId;

        let store = InMemoryStore::new();
        let result = store
            .record_expense(ExpenseRecord {
                id: ExpenseId::new(),
                company_id: CompanyId::new(),
                category: ExpenseCategory::Other,
                amount: dec!(-1),
                date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
