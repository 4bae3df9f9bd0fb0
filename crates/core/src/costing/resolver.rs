//! Cost resolver for sold line items.

use rust_decimal::Decimal;
use stockbook_shared::types::ItemId;

use super::types::{CostSource, LineCost, SaleLineItem};

/// Resolves a sale line's cost contribution to COGS.
///
/// This service contains pure business logic with no store dependencies.
/// Cost lookups are injected as closures so it can run against live state
/// or historical data; it never mutates ledger state and never assumes a
/// unit is still available.
pub struct CostResolver;

impl CostResolver {
    /// Computes the cost contribution of one sale line.
    ///
    /// Serialized lines sum the captured cost of every listed serial,
    /// regardless of the unit's current status. Batched lines multiply the
    /// batch's unit cost by the quantity captured on the sale record (no
    /// live availability re-check).
    ///
    /// A cost record that cannot be resolved contributes zero and flags the
    /// line instead of failing: one missing audit record must not corrupt a
    /// financial report.
    ///
    /// # Arguments
    ///
    /// * `line` - The sale line to price
    /// * `batch_unit_cost` - Lookup for a batch's unit cost by `(item, batch number)`
    /// * `serial_unit_cost` - Lookup for a serialized unit's captured cost
    #[must_use]
    pub fn resolve_line<B, S>(line: &SaleLineItem, batch_unit_cost: B, serial_unit_cost: S) -> LineCost
    where
        B: Fn(&ItemId, &str) -> Option<Decimal>,
        S: Fn(&str) -> Option<Decimal>,
    {
        match &line.cost_source {
            CostSource::Serialized { serial_numbers } => {
                let mut total_cost = Decimal::ZERO;
                let mut flagged = false;

                for serial in serial_numbers {
                    match serial_unit_cost(serial) {
                        Some(cost) => total_cost += cost,
                        None => flagged = true,
                    }
                }

                LineCost { total_cost, flagged }
            }
            CostSource::Batched {
                batch_number,
                quantity,
            } => match batch_unit_cost(&line.item_id, batch_number) {
                Some(unit_cost) => LineCost {
                    total_cost: unit_cost * Decimal::from(*quantity),
                    flagged: false,
                },
                None => LineCost {
                    total_cost: Decimal::ZERO,
                    flagged: true,
                },
            },
        }
    }
}
