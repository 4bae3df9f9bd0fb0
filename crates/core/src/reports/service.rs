//! Profit-and-loss statement composition.

use rust_decimal::{Decimal, RoundingStrategy};

use super::period::DateRange;
use super::types::{
    CogsSummary, ComparisonSnapshot, MetricChanges, OperatingExpenses, PeriodComparison,
    PeriodStatement, ProfitLine, RevenueSummary, StatementPeriod,
};
use crate::expenses::ExpenseSummary;
use crate::sales::SalesTotals;

/// Service composing period statements and comparisons.
///
/// This service contains pure business logic with no store dependencies:
/// it takes already-aggregated sales and expense figures and assembles the
/// statement, guarding every division.
pub struct ProfitLossService;

impl ProfitLossService {
    /// Assembles a full statement from aggregated inputs.
    ///
    /// Gross profit is revenue minus COGS; net income subtracts operating
    /// expenses. Margins are relative to revenue and are zero for a
    /// zero-revenue period rather than dividing by zero.
    #[must_use]
    pub fn compose(
        range: &DateRange,
        sales: &SalesTotals,
        expenses: &ExpenseSummary,
    ) -> PeriodStatement {
        let gross_profit = sales.revenue - sales.cogs;
        let net_income = gross_profit - expenses.total;

        PeriodStatement {
            revenue: RevenueSummary {
                total: sales.revenue,
                count: sales.sales_count,
            },
            cogs: CogsSummary {
                total: sales.cogs,
                unresolved_lines: sales.unresolved_lines,
            },
            gross_profit: ProfitLine {
                amount: gross_profit,
                margin_pct: Self::margin_pct(gross_profit, sales.revenue),
            },
            operating_expenses: OperatingExpenses {
                total: expenses.total,
                breakdown: expenses.by_category.clone(),
            },
            net_income: ProfitLine {
                amount: net_income,
                margin_pct: Self::margin_pct(net_income, sales.revenue),
            },
            period: Self::period(range),
        }
    }

    /// Builds the lightweight per-period metrics used for comparisons.
    #[must_use]
    pub fn snapshot(
        range: &DateRange,
        sales: &SalesTotals,
        total_expenses: Decimal,
    ) -> ComparisonSnapshot {
        let gross_profit = sales.revenue - sales.cogs;

        ComparisonSnapshot {
            period: Self::period(range),
            revenue: sales.revenue,
            cogs: sales.cogs,
            gross_profit,
            operating_expenses: total_expenses,
            net_income: gross_profit - total_expenses,
        }
    }

    /// Compares two period snapshots metric by metric.
    #[must_use]
    pub fn compare(current: ComparisonSnapshot, previous: ComparisonSnapshot) -> PeriodComparison {
        let changes = MetricChanges {
            revenue_pct: Self::percent_change(current.revenue, previous.revenue),
            cogs_pct: Self::percent_change(current.cogs, previous.cogs),
            gross_profit_pct: Self::percent_change(current.gross_profit, previous.gross_profit),
            operating_expenses_pct: Self::percent_change(
                current.operating_expenses,
                previous.operating_expenses,
            ),
            net_income_pct: Self::percent_change(current.net_income, previous.net_income),
        };

        PeriodComparison {
            current,
            previous,
            changes,
        }
    }

    /// Percent change from `previous` to `current`.
    ///
    /// A zero base cannot be divided by: going from nothing to something
    /// counts as a full-scale (100%) increase, staying at nothing as no
    /// change. Otherwise `(current - previous) / |previous| * 100`.
    #[must_use]
    pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
        if previous.is_zero() {
            return if current > Decimal::ZERO {
                Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
        }
        ((current - previous) / previous.abs() * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }

    /// Margin of `amount` relative to `revenue`; zero when revenue is zero.
    fn margin_pct(amount: Decimal, revenue: Decimal) -> Decimal {
        if revenue <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (amount / revenue * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }

    fn period(range: &DateRange) -> StatementPeriod {
        StatementPeriod {
            start: range.start(),
            end: range.end(),
            days: range.days(),
        }
    }
}
