//! Statement building and period comparison over the stores.

use std::sync::Arc;

use stockbook_core::reports::{
    DateRange, PeriodComparison, PeriodStatement, ProfitLossService, StatementRequest,
};
use stockbook_shared::AppResult;
use stockbook_shared::types::CompanyId;

use crate::expenses::{ExpenseAggregator, ExpenseStore};
use crate::ledger::StockLedger;
use crate::sales::{SalesAggregator, SalesStore};

/// Builds period statements and comparisons for the reporting boundary.
///
/// Statements are always produced, even with missing cost data; the
/// unresolved-line count on the COGS section is the precision caveat.
pub struct ReportingService<S> {
    sales: SalesAggregator<S>,
    expenses: ExpenseAggregator<S>,
}

impl<S> ReportingService<S>
where
    S: SalesStore + ExpenseStore + StockLedger,
{
    /// Creates a reporting service over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            sales: SalesAggregator::new(Arc::clone(&store)),
            expenses: ExpenseAggregator::new(store),
        }
    }

    /// Builds a full statement for a company over an inclusive date range.
    pub async fn build_statement(
        &self,
        company_id: CompanyId,
        range: &DateRange,
    ) -> AppResult<PeriodStatement> {
        let sales_totals = self.sales.totals(company_id, range).await?;
        let expense_summary = self.expenses.summarize(company_id, range).await?;

        Ok(ProfitLossService::compose(
            range,
            &sales_totals,
            &expense_summary,
        ))
    }

    /// Validates a boundary request and builds the statement for it.
    ///
    /// Requests missing either date are rejected before any store access.
    pub async fn statement_from_request(
        &self,
        company_id: CompanyId,
        request: &StatementRequest,
    ) -> AppResult<PeriodStatement> {
        let range = DateRange::from_request(request)?;
        self.build_statement(company_id, &range).await
    }

    /// Compares two periods metric by metric.
    ///
    /// Only the headline figures are aggregated for each period; no
    /// category breakdown is fetched.
    pub async fn compare(
        &self,
        company_id: CompanyId,
        current: &DateRange,
        previous: &DateRange,
    ) -> AppResult<PeriodComparison> {
        let current_snapshot = self.snapshot(company_id, current).await?;
        let previous_snapshot = self.snapshot(company_id, previous).await?;

        Ok(ProfitLossService::compare(
            current_snapshot,
            previous_snapshot,
        ))
    }

    async fn snapshot(
        &self,
        company_id: CompanyId,
        range: &DateRange,
    ) -> AppResult<stockbook_core::reports::ComparisonSnapshot> {
        let sales_totals = self.sales.totals(company_id, range).await?;
        let expense_summary = self.expenses.summarize(company_id, range).await?;

        Ok(ProfitLossService::snapshot(
            range,
            &sales_totals,
            expense_summary.total,
        ))
    }
}
