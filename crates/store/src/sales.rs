//! Sales store surface and period sales aggregation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use stockbook_core::costing::{CostResolver, CostSource};
use stockbook_core::reports::DateRange;
use stockbook_core::sales::{ReturnStatus, Sale, SaleStatus, SalesTotals};
use stockbook_shared::types::{CompanyId, ItemId};
use stockbook_shared::{AppError, AppResult};

use crate::ledger::StockLedger;

/// Read/append surface for committed sale records.
///
/// Sales are owned by the sales subsystem; this engine appends committed
/// records handed to it and reads them back for aggregation. A sale and its
/// line items are one record: implementations must insert and return them
/// atomically so aggregation never sees a half-visible sale.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Records one committed sale with all of its lines.
    async fn record_sale(&self, sale: Sale) -> AppResult<()>;

    /// All sales for a company whose sale date falls in the range, read
    /// from one coherent snapshot.
    async fn sales_in_range(&self, company_id: CompanyId, range: &DateRange)
    -> AppResult<Vec<Sale>>;
}

/// Computes revenue and COGS totals for a company over a date range.
///
/// Revenue excludes *returned* sales; COGS excludes *reversed* sales. The
/// two predicates are distinct business states and are applied
/// independently.
pub struct SalesAggregator<S> {
    store: Arc<S>,
}

impl<S> SalesAggregator<S>
where
    S: SalesStore + StockLedger,
{
    /// Creates an aggregator over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Aggregates revenue, sale count, and COGS for the period.
    ///
    /// Cost data (batch and serial unit costs) is immutable after intake,
    /// so it is prefetched through the ledger read path and resolved
    /// line by line with [`CostResolver`].
    pub async fn totals(&self, company_id: CompanyId, range: &DateRange) -> AppResult<SalesTotals> {
        let sales = self.store.sales_in_range(company_id, range).await?;

        let mut totals = SalesTotals::empty();

        for sale in sales.iter().filter(|s| s.return_status != ReturnStatus::Returned) {
            totals.revenue += sale.total_amount;
            totals.sales_count += 1;
        }

        let costed_sales: Vec<&Sale> = sales
            .iter()
            .filter(|s| s.status != SaleStatus::Reversed)
            .collect();

        let (batch_costs, serial_costs) = self.prefetch_costs(&costed_sales).await?;

        for sale in costed_sales {
            for line in &sale.lines {
                let cost = CostResolver::resolve_line(
                    line,
                    |item, batch| batch_costs.get(&(*item, batch.to_string())).copied(),
                    |serial| serial_costs.get(serial).copied(),
                );
                totals.cogs += cost.total_cost;
                if cost.flagged {
                    totals.unresolved_lines += 1;
                    tracing::warn!(
                        sale_id = %sale.id,
                        line_id = %line.id,
                        "cost data missing for sale line, contribution degraded"
                    );
                }
            }
        }

        Ok(totals)
    }

    /// Fetches the unit costs referenced by the given sales.
    async fn prefetch_costs(
        &self,
        sales: &[&Sale],
    ) -> AppResult<(
        HashMap<(ItemId, String), Decimal>,
        HashMap<String, Decimal>,
    )> {
        let mut batch_costs = HashMap::new();
        let mut serial_costs = HashMap::new();

        for sale in sales {
            for line in &sale.lines {
                match &line.cost_source {
                    CostSource::Batched { batch_number, .. } => {
                        let key = (line.item_id, batch_number.clone());
                        if batch_costs.contains_key(&key) {
                            continue;
                        }
                        if let Some(batch) = self
                            .store
                            .batch(line.item_id, batch_number)
                            .await
                            .map_err(AppError::from)?
                        {
                            batch_costs.insert(key, batch.unit_cost);
                        }
                    }
                    CostSource::Serialized { serial_numbers } => {
                        for serial in serial_numbers {
                            if serial_costs.contains_key(serial) {
                                continue;
                            }
                            if let Some(unit) = self
                                .store
                                .serial_unit(serial)
                                .await
                                .map_err(AppError::from)?
                            {
                                serial_costs.insert(serial.clone(), unit.unit_cost);
                            }
                        }
                    }
                }
            }
        }

        Ok((batch_costs, serial_costs))
    }
}
