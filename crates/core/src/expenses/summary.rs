//! Expense summarization by category.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::types::{ExpenseCategory, ExpenseRecord};

/// Totals for one expense category within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category.
    pub category: ExpenseCategory,
    /// Sum of amounts in the category.
    pub total: Decimal,
    /// Number of expense records in the category.
    pub count: u64,
    /// Share of total operating expenses, in percent. Zero when the period
    /// has no expenses at all (never NaN).
    pub pct_of_total: Decimal,
}

/// Operating expense totals grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// Total operating expenses.
    pub total: Decimal,
    /// Per-category breakdown, sorted by total descending; ties broken by
    /// category name ascending for determinism.
    pub by_category: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    /// Summary for a period with no expenses.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: Decimal::ZERO,
            by_category: Vec::new(),
        }
    }
}

/// Service summarizing operating expenses.
///
/// Pure business logic: takes already-filtered records, produces the
/// grouped breakdown.
pub struct ExpenseService;

impl ExpenseService {
    /// Groups expense records by category and computes totals and shares.
    #[must_use]
    pub fn summarize(records: &[ExpenseRecord]) -> ExpenseSummary {
        let mut groups: HashMap<ExpenseCategory, (Decimal, u64)> = HashMap::new();
        for record in records {
            let entry = groups.entry(record.category).or_insert((Decimal::ZERO, 0));
            entry.0 += record.amount;
            entry.1 += 1;
        }

        let total: Decimal = groups.values().map(|(amount, _)| *amount).sum();

        let mut by_category: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category, (category_total, count))| CategoryTotal {
                category,
                total: category_total,
                count,
                pct_of_total: Self::share_pct(category_total, total),
            })
            .collect();

        by_category.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });

        ExpenseSummary { total, by_category }
    }

    /// Percentage share with a zero-total guard.
    fn share_pct(part: Decimal, total: Decimal) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }
        (part / total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }
}
