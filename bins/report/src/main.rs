//! Stockbook demo reporter.
//!
//! Seeds the in-memory store with a month of sample trading (purchases,
//! batched and serialized sales, expenses), then prints the period
//! statement and a month-over-month comparison as JSON.
//!
//! Usage: cargo run --bin report

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockbook_core::costing::{CostSource, SaleLineItem};
use stockbook_core::expenses::{ExpenseCategory, ExpenseRecord};
use stockbook_core::reports::DateRange;
use stockbook_core::sales::{ReturnStatus, Sale, SaleStatus};
use stockbook_core::stock::{ConsumeRequest, ConsumeSerialRequest, ReceiveBatch, ReceiveSerializedUnit};
use stockbook_shared::AppConfig;
use stockbook_shared::types::{CompanyId, ExpenseId, ItemId, PurchaseId, SaleId, SaleLineId};
use stockbook_store::{ExpenseStore, InMemoryStore, ReportingService, SalesStore, StockLedger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let store = Arc::new(InMemoryStore::with_config(&config.ledger));

    let company_id = CompanyId::new();
    seed(&store, company_id).await?;
    info!("sample data seeded");

    let reporting = ReportingService::new(Arc::clone(&store));

    let january = DateRange::new(date(2026, 1, 1), date(2026, 1, 31))?;
    let february = DateRange::new(date(2026, 2, 1), date(2026, 2, 28))?;

    let statement = reporting.build_statement(company_id, &february).await?;
    println!("{}", serde_json::to_string_pretty(&statement)?);

    let comparison = reporting.compare(company_id, &february, &january).await?;
    println!("{}", serde_json::to_string_pretty(&comparison)?);

    let inventory_value = store.current_value(None).await?;
    info!(%inventory_value, "current inventory valuation at cost");

    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid demo date")
}

fn money(units: i64) -> Decimal {
    Decimal::from(units)
}

/// Seeds one phone-shop month: a batch of cases, three serialized phones,
/// a few sales (one returned), and the running expenses.
async fn seed(store: &Arc<InMemoryStore>, company_id: CompanyId) -> anyhow::Result<()> {
    let cases = ItemId::new();
    let phone = ItemId::new();
    store.register_item(cases);
    store.register_item(phone);

    store
        .receive_batch(ReceiveBatch {
            item_id: cases,
            batch_number: "CASE-2601".to_string(),
            purchase_id: PurchaseId::new(),
            purchase_qty: 100,
            unit_cost: money(4),
            selling_price: money(9),
            purchase_date: date(2026, 1, 3),
            expiry_date: None,
        })
        .await?;

    for (serial, cost) in [("IMEI-8801", 310), ("IMEI-8802", 310), ("IMEI-8803", 335)] {
        store
            .receive_serialized_unit(ReceiveSerializedUnit {
                item_id: phone,
                serial_number: serial.to_string(),
                purchase_id: PurchaseId::new(),
                unit_cost: money(cost),
                received_at: date(2026, 1, 4),
            })
            .await?;
    }

    // January: 20 cases sold.
    record_batched_sale(store, company_id, cases, "CASE-2601", 20, 9, date(2026, 1, 18)).await?;

    // February: 30 more cases, two phones, and one returned case sale.
    record_batched_sale(store, company_id, cases, "CASE-2601", 30, 9, date(2026, 2, 6)).await?;
    record_serialized_sale(
        store,
        company_id,
        phone,
        &["IMEI-8801", "IMEI-8803"],
        450,
        date(2026, 2, 12),
    )
    .await?;

    let mut returned =
        build_batched_sale(company_id, cases, "CASE-2601", 5, 9, date(2026, 2, 20));
    returned.return_status = ReturnStatus::Returned;
    consume_for(store, &returned).await?;
    store.record_sale(returned).await?;

    for (category, amount, day) in [
        (ExpenseCategory::Rent, 120, date(2026, 1, 1)),
        (ExpenseCategory::Rent, 120, date(2026, 2, 1)),
        (ExpenseCategory::Utilities, 35, date(2026, 2, 8)),
        (ExpenseCategory::Marketing, 60, date(2026, 2, 15)),
    ] {
        store
            .record_expense(ExpenseRecord {
                id: ExpenseId::new(),
                company_id,
                category,
                amount: money(amount),
                date: day,
            })
            .await?;
    }

    Ok(())
}

fn build_batched_sale(
    company_id: CompanyId,
    item_id: ItemId,
    batch_number: &str,
    qty: i64,
    unit_price: i64,
    sale_date: NaiveDate,
) -> Sale {
    Sale {
        id: SaleId::new(),
        company_id,
        sale_date,
        total_amount: money(unit_price * qty),
        status: SaleStatus::Completed,
        return_status: ReturnStatus::NotReturned,
        lines: vec![SaleLineItem {
            id: SaleLineId::new(),
            item_id,
            cost_source: CostSource::Batched {
                batch_number: batch_number.to_string(),
                quantity: qty,
            },
            unit_price: money(unit_price),
            discount: Decimal::ZERO,
        }],
    }
}

async fn consume_for(store: &Arc<InMemoryStore>, sale: &Sale) -> anyhow::Result<()> {
    for line in &sale.lines {
        match &line.cost_source {
            CostSource::Batched {
                batch_number,
                quantity,
            } => {
                store
                    .consume(ConsumeRequest {
                        item_id: line.item_id,
                        batch_number: batch_number.clone(),
                        qty: *quantity,
                        idempotency_key: Some(line.id),
                    })
                    .await?;
            }
            CostSource::Serialized { serial_numbers } => {
                for serial in serial_numbers {
                    store
                        .consume_serial(ConsumeSerialRequest {
                            serial_number: serial.clone(),
                            idempotency_key: Some(line.id),
                        })
                        .await?;
                }
            }
        }
    }
    Ok(())
}

async fn record_batched_sale(
    store: &Arc<InMemoryStore>,
    company_id: CompanyId,
    item_id: ItemId,
    batch_number: &str,
    qty: i64,
    unit_price: i64,
    sale_date: NaiveDate,
) -> anyhow::Result<()> {
    let sale = build_batched_sale(company_id, item_id, batch_number, qty, unit_price, sale_date);
    consume_for(store, &sale).await?;
    store.record_sale(sale).await?;
    Ok(())
}

async fn record_serialized_sale(
    store: &Arc<InMemoryStore>,
    company_id: CompanyId,
    item_id: ItemId,
    serials: &[&str],
    unit_price: i64,
    sale_date: NaiveDate,
) -> anyhow::Result<()> {
    let sale = Sale {
        id: SaleId::new(),
        company_id,
        sale_date,
        total_amount: money(unit_price * serials.len() as i64),
        status: SaleStatus::Completed,
        return_status: ReturnStatus::NotReturned,
        lines: vec![SaleLineItem {
            id: SaleLineId::new(),
            item_id,
            cost_source: CostSource::Serialized {
                serial_numbers: serials.iter().map(ToString::to_string).collect(),
            },
            unit_price: money(unit_price),
            discount: Decimal::ZERO,
        }],
    };
    consume_for(store, &sale).await?;
    store.record_sale(sale).await?;
    Ok(())
}
