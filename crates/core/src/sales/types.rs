//! Sale record types, read-only inputs to aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{CompanyId, SaleId};

use crate::costing::SaleLineItem;

/// Processing state of a sale.
///
/// Reversed sales are excluded from cost of goods sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// The sale went through.
    Completed,
    /// The sale was reversed after the fact.
    Reversed,
}

/// Return state of a sale's invoice.
///
/// Returned sales are excluded from revenue. This is a distinct business
/// state from [`SaleStatus::Reversed`] and the two must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    /// No return against this sale.
    NotReturned,
    /// The invoice was returned.
    Returned,
}

/// A committed sale/invoice with its line items.
///
/// A sale and its lines form one record: stores insert and read them as a
/// unit so aggregation never sees a half-visible sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier.
    pub id: SaleId,
    /// The company the sale belongs to.
    pub company_id: CompanyId,
    /// Calendar date of the sale; period filters are inclusive on it.
    pub sale_date: NaiveDate,
    /// Invoice total.
    pub total_amount: Decimal,
    /// Processing state.
    pub status: SaleStatus,
    /// Return state, independent of the processing state.
    pub return_status: ReturnStatus,
    /// Line items.
    pub lines: Vec<SaleLineItem>,
}

/// Revenue and cost totals for one company over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTotals {
    /// Sum of invoice totals over non-returned sales in the period.
    pub revenue: Decimal,
    /// Number of non-returned sales in the period.
    pub sales_count: u64,
    /// Cost of goods sold over non-reversed sales in the period.
    pub cogs: Decimal,
    /// Lines whose cost records could not all be resolved.
    pub unresolved_lines: u64,
}

impl SalesTotals {
    /// Totals for a period with no qualifying sales.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            revenue: Decimal::ZERO,
            sales_count: 0,
            cogs: Decimal::ZERO,
            unresolved_lines: 0,
        }
    }
}
