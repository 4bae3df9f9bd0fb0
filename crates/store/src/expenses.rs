//! Expense store surface and expense aggregation.

use std::sync::Arc;

use async_trait::async_trait;
use stockbook_core::expenses::{ExpenseRecord, ExpenseService, ExpenseSummary};
use stockbook_core::reports::DateRange;
use stockbook_shared::AppResult;
use stockbook_shared::types::CompanyId;

/// Read/append surface for operating expense records.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Records one operating expense. Amounts must be non-negative.
    async fn record_expense(&self, expense: ExpenseRecord) -> AppResult<()>;

    /// All expenses for a company whose date falls in the range.
    async fn expenses_in_range(
        &self,
        company_id: CompanyId,
        range: &DateRange,
    ) -> AppResult<Vec<ExpenseRecord>>;
}

/// Sums operating expenses for a company over a date range, grouped by
/// category.
pub struct ExpenseAggregator<S> {
    store: Arc<S>,
}

impl<S> ExpenseAggregator<S>
where
    S: ExpenseStore,
{
    /// Creates an aggregator over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Summarizes the period's expenses (grouping and shares are computed
    /// by the core expense service).
    pub async fn summarize(
        &self,
        company_id: CompanyId,
        range: &DateRange,
    ) -> AppResult<ExpenseSummary> {
        let records = self.store.expenses_in_range(company_id, range).await?;
        Ok(ExpenseService::summarize(&records))
    }
}
