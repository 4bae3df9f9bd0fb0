//! Property-based tests for statement composition.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::period::DateRange;
use super::service::ProfitLossService;
use crate::expenses::{ExpenseService, ExpenseSummary};
use crate::sales::SalesTotals;

fn any_range() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
    )
    .unwrap()
}

fn totals(revenue: Decimal, cogs: Decimal) -> SalesTotals {
    SalesTotals {
        revenue,
        sales_count: 1,
        cogs,
        unresolved_lines: 0,
    }
}

proptest! {
    /// Gross profit and net income always satisfy their defining equations,
    /// whatever the inputs.
    #[test]
    fn prop_statement_equations_hold(
        revenue in 0i64..1_000_000_000,
        cogs in 0i64..500_000_000,
        opex in 0i64..300_000_000,
    ) {
        let revenue = Decimal::from(revenue);
        let cogs = Decimal::from(cogs);
        let opex = Decimal::from(opex);

        let statement = ProfitLossService::compose(
            &any_range(),
            &totals(revenue, cogs),
            &ExpenseSummary { total: opex, by_category: vec![] },
        );

        prop_assert_eq!(statement.gross_profit.amount, revenue - cogs);
        prop_assert_eq!(statement.net_income.amount, revenue - cogs - opex);
        prop_assert_eq!(statement.operating_expenses.total, opex);
    }

    /// Margins never panic and are always finite decimals, including the
    /// zero-revenue case.
    #[test]
    fn prop_margins_are_total(
        revenue in 0i64..1_000_000,
        cogs in 0i64..1_000_000,
        opex in 0i64..1_000_000,
    ) {
        let statement = ProfitLossService::compose(
            &any_range(),
            &totals(Decimal::from(revenue), Decimal::from(cogs)),
            &ExpenseSummary { total: Decimal::from(opex), by_category: vec![] },
        );

        if revenue == 0 {
            prop_assert_eq!(statement.gross_profit.margin_pct, Decimal::ZERO);
            prop_assert_eq!(statement.net_income.margin_pct, Decimal::ZERO);
        }
        // Gross margin can never exceed 100% of revenue.
        prop_assert!(statement.gross_profit.margin_pct <= Decimal::ONE_HUNDRED);
    }

    /// Percent change has no division-by-zero path and agrees with the
    /// closed form whenever the base is non-zero.
    #[test]
    fn prop_percent_change_total(
        current in -1_000_000i64..1_000_000,
        previous in -1_000_000i64..1_000_000,
    ) {
        let current = Decimal::from(current);
        let previous = Decimal::from(previous);

        let change = ProfitLossService::percent_change(current, previous);

        if previous.is_zero() {
            let expected = if current > Decimal::ZERO {
                Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            prop_assert_eq!(change, expected);
        } else if current == previous {
            prop_assert_eq!(change, Decimal::ZERO);
        }
    }

    /// Comparing a period with itself reports no change on every metric.
    #[test]
    fn prop_self_comparison_is_flat(
        revenue in 1i64..1_000_000,
        cogs in 0i64..1_000_000,
        opex in 0i64..1_000_000,
    ) {
        let snapshot = ProfitLossService::snapshot(
            &any_range(),
            &totals(Decimal::from(revenue), Decimal::from(cogs)),
            Decimal::from(opex),
        );

        let comparison = ProfitLossService::compare(snapshot, snapshot);

        prop_assert_eq!(comparison.changes.revenue_pct, Decimal::ZERO);
        prop_assert_eq!(comparison.changes.cogs_pct, Decimal::ZERO);
        prop_assert_eq!(comparison.changes.operating_expenses_pct, Decimal::ZERO);
    }
}

mod unit_tests {
    use super::*;
    use crate::expenses::{ExpenseCategory, ExpenseRecord};
    use stockbook_shared::types::{CompanyId, ExpenseId};

    #[test]
    fn test_zero_revenue_margins_are_zero() {
        let statement = ProfitLossService::compose(
            &any_range(),
            &SalesTotals::empty(),
            &ExpenseSummary::empty(),
        );

        assert_eq!(statement.revenue.total, Decimal::ZERO);
        assert_eq!(statement.gross_profit.margin_pct, Decimal::ZERO);
        assert_eq!(statement.net_income.margin_pct, Decimal::ZERO);
    }

    #[test]
    fn test_percent_change_zero_base_cases() {
        assert_eq!(
            ProfitLossService::percent_change(dec!(50), dec!(0)),
            dec!(100)
        );
        assert_eq!(ProfitLossService::percent_change(dec!(0), dec!(0)), dec!(0));
        assert_eq!(
            ProfitLossService::percent_change(dec!(150), dec!(100)),
            dec!(50)
        );
    }

    #[test]
    fn test_percent_change_negative_base_uses_magnitude() {
        // From -100 to -50 is an improvement of half the base's magnitude.
        assert_eq!(
            ProfitLossService::percent_change(dec!(-50), dec!(-100)),
            dec!(50)
        );
    }

    #[test]
    fn test_statement_composition() {
        let statement = ProfitLossService::compose(
            &any_range(),
            &SalesTotals {
                revenue: dec!(32),
                sales_count: 1,
                cogs: dec!(20),
                unresolved_lines: 0,
            },
            &ExpenseSummary::empty(),
        );

        assert_eq!(statement.revenue.total, dec!(32));
        assert_eq!(statement.cogs.total, dec!(20));
        assert_eq!(statement.gross_profit.amount, dec!(12));
        assert_eq!(statement.gross_profit.margin_pct, dec!(37.50));
        assert_eq!(statement.net_income.amount, dec!(12));
        assert_eq!(statement.period.days, 31);
    }

    #[test]
    fn test_statement_carries_expense_breakdown() {
        let records = vec![
            ExpenseRecord {
                id: ExpenseId::new(),
                company_id: CompanyId::new(),
                category: ExpenseCategory::Rent,
                amount: dec!(7),
                date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            },
            ExpenseRecord {
                id: ExpenseId::new(),
                company_id: CompanyId::new(),
                category: ExpenseCategory::Transport,
                amount: dec!(3),
                date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            },
        ];
        let expenses = ExpenseService::summarize(&records);

        let statement = ProfitLossService::compose(
            &any_range(),
            &SalesTotals {
                revenue: dec!(100),
                sales_count: 2,
                cogs: dec!(40),
                unresolved_lines: 1,
            },
            &expenses,
        );

        assert_eq!(statement.operating_expenses.total, dec!(10));
        assert_eq!(statement.operating_expenses.breakdown.len(), 2);
        assert_eq!(statement.net_income.amount, dec!(50));
        assert_eq!(statement.net_income.margin_pct, dec!(50.00));
        assert_eq!(statement.cogs.unresolved_lines, 1);
    }

    #[test]
    fn test_comparison_composes_all_metrics() {
        let current = ProfitLossService::snapshot(
            &any_range(),
            &SalesTotals {
                revenue: dec!(150),
                sales_count: 3,
                cogs: dec!(60),
                unresolved_lines: 0,
            },
            dec!(30),
        );
        let previous = ProfitLossService::snapshot(
            &any_range(),
            &SalesTotals {
                revenue: dec!(100),
                sales_count: 2,
                cogs: dec!(50),
                unresolved_lines: 0,
            },
            dec!(0),
        );

        let comparison = ProfitLossService::compare(current, previous);

        assert_eq!(comparison.changes.revenue_pct, dec!(50));
        assert_eq!(comparison.changes.cogs_pct, dec!(20));
        // Gross profit: 90 vs 50.
        assert_eq!(comparison.changes.gross_profit_pct, dec!(80));
        // Expenses went from nothing to something: full-scale increase.
        assert_eq!(comparison.changes.operating_expenses_pct, dec!(100));
        // Net income: 60 vs 50.
        assert_eq!(comparison.changes.net_income_pct, dec!(20));
    }
}
