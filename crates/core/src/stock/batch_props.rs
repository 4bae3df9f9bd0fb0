//! Property-based tests for batch quantity rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockbook_shared::types::{ItemId, PurchaseId};

use super::batch::{BatchState, StockBatch};
use super::inputs::ReceiveBatch;

/// A randomly chosen ledger operation against one batch.
#[derive(Debug, Clone)]
enum BatchOp {
    Consume(i64),
    Restore(i64),
    Adjust(i64),
}

fn batch_op() -> impl Strategy<Value = BatchOp> {
    prop_oneof![
        (1i64..30).prop_map(BatchOp::Consume),
        (1i64..30).prop_map(BatchOp::Restore),
        (-30i64..30).prop_map(BatchOp::Adjust),
    ]
}

fn make_batch(purchase_qty: i64) -> StockBatch {
    StockBatch::receive(
        ReceiveBatch {
            item_id: ItemId::new(),
            batch_number: "B1".to_string(),
            purchase_id: PurchaseId::new(),
            purchase_qty,
            unit_cost: Decimal::new(500, 2),
            selling_price: Decimal::new(800, 2),
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            expiry_date: None,
        },
        0,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any sequence of consume/restore/adjust calls, availability stays
    /// within `[0, purchase_qty]` whether each call succeeds or fails.
    #[test]
    fn prop_availability_stays_in_bounds(
        purchase_qty in 1i64..50,
        ops in proptest::collection::vec(batch_op(), 0..40),
    ) {
        let mut batch = make_batch(purchase_qty);

        for op in ops {
            // Failures are part of the property: a rejected operation must
            // leave the batch untouched, so bounds hold either way.
            let _ = match op {
                BatchOp::Consume(qty) => batch.consume_qty(qty),
                BatchOp::Restore(qty) => batch.restore_qty(qty),
                BatchOp::Adjust(delta) => batch.apply_adjustment(delta),
            };

            prop_assert!(batch.available_qty >= 0);
            prop_assert!(batch.available_qty <= batch.purchase_qty);
            prop_assert!(batch.sold_qty >= 0);
            prop_assert_eq!(batch.purchase_qty, purchase_qty);
        }
    }

    /// A failed consume never mutates the batch.
    #[test]
    fn prop_failed_consume_is_a_no_op(
        purchase_qty in 1i64..50,
        excess in 1i64..20,
    ) {
        let mut batch = make_batch(purchase_qty);
        let before = batch.clone();

        let result = batch.consume_qty(purchase_qty + excess);
        prop_assert!(result.is_err());
        prop_assert_eq!(batch, before);
    }

    /// Consuming everything in arbitrary chunks always ends exhausted with
    /// `sold_qty == purchase_qty`.
    #[test]
    fn prop_full_consumption_exhausts(
        chunks in proptest::collection::vec(1i64..10, 1..20),
    ) {
        let total: i64 = chunks.iter().sum();
        let mut batch = make_batch(total);

        for chunk in chunks {
            batch.consume_qty(chunk).unwrap();
        }

        prop_assert_eq!(batch.available_qty, 0);
        prop_assert_eq!(batch.sold_qty, total);
        prop_assert_eq!(batch.state(), BatchState::Exhausted);
    }

    /// Consume followed by a full restore returns to the initial quantities.
    #[test]
    fn prop_consume_then_restore_roundtrip(
        purchase_qty in 1i64..50,
    ) {
        let mut batch = make_batch(purchase_qty);
        batch.consume_qty(purchase_qty).unwrap();
        batch.restore_qty(purchase_qty).unwrap();

        prop_assert_eq!(batch.available_qty, purchase_qty);
        prop_assert_eq!(batch.sold_qty, 0);
        prop_assert_eq!(batch.state(), BatchState::Created);
    }
}
