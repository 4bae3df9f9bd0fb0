//! Operating expense record types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{CompanyId, ExpenseId};

/// Operating expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Repairs and upkeep.
    Maintenance,
    /// Advertising and promotion.
    Marketing,
    /// Premises rent.
    Rent,
    /// Staff salaries and wages.
    Salaries,
    /// Freight and delivery.
    Transport,
    /// Electricity, water, connectivity.
    Utilities,
    /// Anything uncategorized.
    Other,
}

impl ExpenseCategory {
    /// Stable name used for display and deterministic tie-breaking.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Marketing => "marketing",
            Self::Rent => "rent",
            Self::Salaries => "salaries",
            Self::Transport => "transport",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operating expense; read-only input to aggregation.
///
/// Amounts are non-negative; the recording store rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier.
    pub id: ExpenseId,
    /// The company the expense belongs to.
    pub company_id: CompanyId,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Amount spent (>= 0).
    pub amount: Decimal,
    /// Calendar date of the expense.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_are_stable() {
        assert_eq!(ExpenseCategory::Rent.as_str(), "rent");
        assert_eq!(ExpenseCategory::Salaries.to_string(), "salaries");
        assert_eq!(ExpenseCategory::Other.as_str(), "other");
    }
}
