//! Sale line and cost-source types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ItemId, SaleLineId};

/// Where a sale line's cost comes from.
///
/// A tagged variant instead of a flag plus optional fields: the resolver's
/// branch is exhaustive and there is no undefined field combination to fall
/// through to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CostSource {
    /// Individually tracked units; one serial per physical unit sold.
    Serialized {
        /// The serial numbers sold on this line.
        serial_numbers: Vec<String>,
    },
    /// Batch-costed units.
    Batched {
        /// The batch the units were consumed from.
        batch_number: String,
        /// Quantity sold from the batch.
        quantity: i64,
    },
}

impl CostSource {
    /// Quantity sold on this line, derived from the variant so that the
    /// serial-count-equals-quantity invariant holds by construction.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        match self {
            Self::Serialized { serial_numbers } => serial_numbers.len() as i64,
            Self::Batched { quantity, .. } => *quantity,
        }
    }
}

/// One line of a sale/invoice; read-only input to the costing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineItem {
    /// Unique identifier (also the consume idempotency key).
    pub id: SaleLineId,
    /// The item sold.
    pub item_id: ItemId,
    /// Where the line's cost comes from.
    pub cost_source: CostSource,
    /// Selling price per unit.
    pub unit_price: Decimal,
    /// Discount applied to the whole line.
    pub discount: Decimal,
}

impl SaleLineItem {
    /// Quantity sold on this line.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.cost_source.quantity()
    }

    /// Line total after discount.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity()) - self.discount
    }
}

/// Cost contribution of one resolved sale line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCost {
    /// Total cost attributed to the line.
    pub total_cost: Decimal,
    /// True when one or more cost records could not be resolved and
    /// contributed zero. Surfaced as a count on statements, never an error.
    pub flagged: bool,
}
