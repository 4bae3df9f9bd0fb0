//! Serialized unit record and status transitions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ItemId, PurchaseId};

use super::error::StockError;
use super::inputs::ReceiveSerializedUnit;

/// Availability of a serialized unit.
///
/// Kept explicit for O(1) lookup instead of scanning sales history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// The unit is in stock and can be sold.
    Available,
    /// The unit has been sold (at most once).
    Sold,
}

/// One individually tracked physical item with its own captured cost.
///
/// The unit cost is the exact cost of this physical unit, never an average,
/// and is immutable after intake: cost lookups for reporting must not be
/// affected by what happens to the unit later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedUnit {
    /// Globally unique serial number (caller-supplied, e.g. IMEI).
    pub serial_number: String,
    /// The catalog item this unit is an instance of.
    pub item_id: ItemId,
    /// The purchase receipt that brought this unit in.
    pub purchase_id: PurchaseId,
    /// Cost of this physical unit, captured at intake.
    pub unit_cost: Decimal,
    /// Current availability.
    pub status: UnitStatus,
    /// Date the unit was received.
    pub received_at: NaiveDate,
}

impl SerializedUnit {
    /// Creates a unit from an intake record.
    ///
    /// # Errors
    ///
    /// Returns `NegativeCost` for a negative unit cost.
    pub fn receive(input: ReceiveSerializedUnit) -> Result<Self, StockError> {
        if input.unit_cost < Decimal::ZERO {
            return Err(StockError::NegativeCost);
        }

        Ok(Self {
            serial_number: input.serial_number,
            item_id: input.item_id,
            purchase_id: input.purchase_id,
            unit_cost: input.unit_cost,
            status: UnitStatus::Available,
            received_at: input.received_at,
        })
    }

    /// Returns true if the unit can still be sold.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == UnitStatus::Available
    }

    /// Marks the unit as sold.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySold` if the unit has no remaining availability.
    pub fn mark_sold(&mut self) -> Result<(), StockError> {
        if self.status == UnitStatus::Sold {
            return Err(StockError::AlreadySold(self.serial_number.clone()));
        }
        self.status = UnitStatus::Sold;
        Ok(())
    }

    /// Marks the unit as available again (sale reversal).
    ///
    /// # Errors
    ///
    /// Returns `SerialNotSold` if the unit was not sold.
    pub fn mark_available(&mut self) -> Result<(), StockError> {
        if self.status == UnitStatus::Available {
            return Err(StockError::SerialNotSold(self.serial_number.clone()));
        }
        self.status = UnitStatus::Available;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_unit() -> SerializedUnit {
        SerializedUnit::receive(ReceiveSerializedUnit {
            item_id: ItemId::new(),
            serial_number: "SN-001".to_string(),
            purchase_id: PurchaseId::new(),
            unit_cost: dec!(120),
            received_at: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn test_receive_starts_available() {
        let unit = make_unit();
        assert!(unit.is_available());
        assert_eq!(unit.unit_cost, dec!(120));
    }

    #[test]
    fn test_receive_rejects_negative_cost() {
        let result = SerializedUnit::receive(ReceiveSerializedUnit {
            item_id: ItemId::new(),
            serial_number: "SN-001".to_string(),
            purchase_id: PurchaseId::new(),
            unit_cost: dec!(-1),
            received_at: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        });
        assert!(matches!(result, Err(StockError::NegativeCost)));
    }

    #[test]
    fn test_unit_sells_at_most_once() {
        let mut unit = make_unit();
        unit.mark_sold().unwrap();
        assert!(!unit.is_available());

        let err = unit.mark_sold().unwrap_err();
        assert!(matches!(err, StockError::AlreadySold(serial) if serial == "SN-001"));
    }

    #[test]
    fn test_restore_requires_sold() {
        let mut unit = make_unit();
        assert!(matches!(
            unit.mark_available(),
            Err(StockError::SerialNotSold(_))
        ));

        unit.mark_sold().unwrap();
        unit.mark_available().unwrap();
        assert!(unit.is_available());
    }

    #[test]
    fn test_cost_survives_sale() {
        let mut unit = make_unit();
        unit.mark_sold().unwrap();
        // Cost is a historical fact; selling the unit does not touch it.
        assert_eq!(unit.unit_cost, dec!(120));
    }
}
