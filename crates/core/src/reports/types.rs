//! Period statement data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::CategoryTotal;

/// Revenue section of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    /// Sum of invoice totals over qualifying sales.
    pub total: Decimal,
    /// Number of qualifying sales.
    pub count: u64,
}

/// Cost-of-goods-sold section of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CogsSummary {
    /// Total cost of goods sold.
    pub total: Decimal,
    /// Lines whose cost records could not all be resolved; those lines
    /// contributed partial (or zero) cost, so the statement's precision is
    /// degraded rather than the report failing.
    pub unresolved_lines: u64,
}

/// An amount with its margin relative to revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLine {
    /// The profit amount.
    pub amount: Decimal,
    /// The amount as a percentage of revenue; zero when revenue is zero.
    pub margin_pct: Decimal,
}

/// Operating expense section of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    /// Total operating expenses.
    pub total: Decimal,
    /// Per-category breakdown, sorted by total descending.
    pub breakdown: Vec<CategoryTotal>,
}

/// The reported period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    /// Inclusive start date.
    pub start: NaiveDate,
    /// Inclusive end date.
    pub end: NaiveDate,
    /// Number of calendar days covered, counting both bounds.
    pub days: i64,
}

/// A full profit-and-loss statement for one company and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatement {
    /// Revenue section.
    pub revenue: RevenueSummary,
    /// Cost of goods sold section.
    pub cogs: CogsSummary,
    /// Gross profit (revenue - COGS).
    pub gross_profit: ProfitLine,
    /// Operating expenses section.
    pub operating_expenses: OperatingExpenses,
    /// Net income (gross profit - operating expenses).
    pub net_income: ProfitLine,
    /// The reported period.
    pub period: StatementPeriod,
}

/// Lightweight per-period metrics used for comparisons.
///
/// Carries only the headline numbers; no category breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    /// The snapshot's period.
    pub period: StatementPeriod,
    /// Revenue total.
    pub revenue: Decimal,
    /// Cost of goods sold total.
    pub cogs: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Total operating expenses.
    pub operating_expenses: Decimal,
    /// Net income.
    pub net_income: Decimal,
}

/// Percent change of each headline metric between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricChanges {
    /// Revenue change in percent.
    pub revenue_pct: Decimal,
    /// COGS change in percent.
    pub cogs_pct: Decimal,
    /// Gross profit change in percent.
    pub gross_profit_pct: Decimal,
    /// Operating expense change in percent.
    pub operating_expenses_pct: Decimal,
    /// Net income change in percent.
    pub net_income_pct: Decimal,
}

/// Result of comparing two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// The current period's metrics.
    pub current: ComparisonSnapshot,
    /// The previous period's metrics.
    pub previous: ComparisonSnapshot,
    /// Percent change per metric, current versus previous.
    pub changes: MetricChanges,
}
