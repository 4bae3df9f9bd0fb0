//! Stock batch record and its pure quantity transitions.
//!
//! A batch is a group of identical non-serialized units received together,
//! tracked as one quantity-plus-cost record. All quantity rules live here so
//! they can be tested without a store; store engines call these transitions
//! inside their own critical sections.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ItemId, PurchaseId};

use super::error::StockError;
use super::inputs::ReceiveBatch;

/// Lifecycle state of a batch, derived from `available_qty` only.
///
/// There is no terminal deletion: an exhausted batch stays on record
/// because sold lines keep referencing it for cost lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// Nothing consumed yet (`available_qty == purchase_qty`).
    Created,
    /// Some units consumed (`0 < available_qty < purchase_qty`).
    PartiallyConsumed,
    /// All availability gone (`available_qty == 0`).
    Exhausted,
}

/// A non-serialized costing unit: quantity plus captured cost and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBatch {
    /// The catalog item this batch belongs to.
    pub item_id: ItemId,
    /// Batch number, unique per item (caller-supplied).
    pub batch_number: String,
    /// The purchase receipt that created this batch.
    pub purchase_id: PurchaseId,
    /// Quantity purchased; immutable after creation.
    pub purchase_qty: i64,
    /// Quantity still available; decremented by sales, moved by adjustments.
    pub available_qty: i64,
    /// Quantity consumed by sales (never by manual adjustments).
    pub sold_qty: i64,
    /// Sum of `available_qty` across the item's other batches at receipt time.
    pub before_purchase_available_qty: i64,
    /// Cost per unit, captured at receipt.
    pub unit_cost: Decimal,
    /// Selling price per unit.
    pub selling_price: Decimal,
    /// Date the batch was purchased.
    pub purchase_date: NaiveDate,
    /// Optional expiry date.
    pub expiry_date: Option<NaiveDate>,
}

impl StockBatch {
    /// Creates a batch from a receipt, stamping the pre-receipt availability
    /// snapshot computed by the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive purchase quantity and
    /// `NegativeCost` for a negative unit cost or selling price.
    pub fn receive(
        input: ReceiveBatch,
        before_purchase_available_qty: i64,
    ) -> Result<Self, StockError> {
        if input.purchase_qty <= 0 {
            return Err(StockError::InvalidQuantity(input.purchase_qty));
        }
        if input.unit_cost < Decimal::ZERO || input.selling_price < Decimal::ZERO {
            return Err(StockError::NegativeCost);
        }

        Ok(Self {
            item_id: input.item_id,
            batch_number: input.batch_number,
            purchase_id: input.purchase_id,
            purchase_qty: input.purchase_qty,
            available_qty: input.purchase_qty,
            sold_qty: 0,
            before_purchase_available_qty,
            unit_cost: input.unit_cost,
            selling_price: input.selling_price,
            purchase_date: input.purchase_date,
            expiry_date: input.expiry_date,
        })
    }

    /// Returns the lifecycle state derived from the current availability.
    #[must_use]
    pub fn state(&self) -> BatchState {
        if self.available_qty == 0 {
            BatchState::Exhausted
        } else if self.available_qty < self.purchase_qty {
            BatchState::PartiallyConsumed
        } else {
            BatchState::Created
        }
    }

    /// Profit margin percentage, recomputed on every read.
    ///
    /// `(selling_price - unit_cost) / unit_cost * 100`, rounded to two
    /// decimal places with banker's rounding. A zero unit cost yields zero
    /// rather than dividing by zero.
    #[must_use]
    pub fn profit_margin_pct(&self) -> Decimal {
        if self.unit_cost.is_zero() {
            return Decimal::ZERO;
        }
        ((self.selling_price - self.unit_cost) / self.unit_cost * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }

    /// Current valuation of this batch at cost.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.available_qty) * self.unit_cost
    }

    /// Consumes `qty` units for a sale.
    ///
    /// Checks and decrements in one step; on failure nothing is mutated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive quantity and
    /// `InsufficientStock` when the batch cannot cover the request.
    pub fn consume_qty(&mut self, qty: i64) -> Result<(), StockError> {
        if qty <= 0 {
            return Err(StockError::InvalidQuantity(qty));
        }
        if qty > self.available_qty {
            return Err(StockError::InsufficientStock {
                batch_number: self.batch_number.clone(),
                requested: qty,
                available: self.available_qty,
            });
        }

        self.available_qty -= qty;
        self.sold_qty += qty;
        Ok(())
    }

    /// Restores `qty` previously sold units (sale reversal).
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive quantity,
    /// `NothingToRestore` when more is restored than was sold, and
    /// `ExceedsBatchCapacity` if the restore would push availability above
    /// the purchased quantity.
    pub fn restore_qty(&mut self, qty: i64) -> Result<(), StockError> {
        if qty <= 0 {
            return Err(StockError::InvalidQuantity(qty));
        }
        if qty > self.sold_qty {
            return Err(StockError::NothingToRestore {
                batch_number: self.batch_number.clone(),
                requested: qty,
                sold: self.sold_qty,
            });
        }
        let new_available = self.available_qty + qty;
        if new_available > self.purchase_qty {
            return Err(StockError::ExceedsBatchCapacity {
                batch_number: self.batch_number.clone(),
                requested: new_available,
                capacity: self.purchase_qty,
            });
        }

        self.available_qty = new_available;
        self.sold_qty -= qty;
        Ok(())
    }

    /// Applies a manual adjustment (loss, damage, correction).
    ///
    /// Positive deltas re-add stock, negative deltas write it off. Sold
    /// quantity is untouched: an adjustment is not a sale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a zero delta, `InsufficientStock` when
    /// the result would go negative, and `ExceedsBatchCapacity` when it
    /// would exceed the purchased quantity.
    pub fn apply_adjustment(&mut self, delta_qty: i64) -> Result<(), StockError> {
        if delta_qty == 0 {
            return Err(StockError::InvalidQuantity(delta_qty));
        }
        let new_available = self.available_qty + delta_qty;
        if new_available < 0 {
            return Err(StockError::InsufficientStock {
                batch_number: self.batch_number.clone(),
                requested: -delta_qty,
                available: self.available_qty,
            });
        }
        if new_available > self.purchase_qty {
            return Err(StockError::ExceedsBatchCapacity {
                batch_number: self.batch_number.clone(),
                requested: new_available,
                capacity: self.purchase_qty,
            });
        }

        self.available_qty = new_available;
        Ok(())
    }
}
