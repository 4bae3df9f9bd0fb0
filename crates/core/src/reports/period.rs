//! Inclusive reporting periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// A raw reporting request as it arrives at the protocol boundary.
///
/// Both bounds are required; validation happens in
/// [`DateRange::from_request`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatementRequest {
    /// Inclusive start date, if supplied.
    pub start: Option<NaiveDate>,
    /// Inclusive end date, if supplied.
    pub end: Option<NaiveDate>,
}

/// An inclusive calendar date range `[start, end]`.
///
/// Construction validates the ordering, so a value of this type always
/// denotes at least one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from validated bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Validates a boundary request into a range.
    ///
    /// # Errors
    ///
    /// Returns `MissingDateRange` when either bound is absent and
    /// `InvalidDateRange` when the bounds are inverted.
    pub fn from_request(request: &StatementRequest) -> Result<Self, ReportError> {
        let start = request
            .start
            .ok_or(ReportError::MissingDateRange { field: "start" })?;
        let end = request
            .end
            .ok_or(ReportError::MissingDateRange { field: "end" })?;
        Self::new(start, end)
    }

    /// Inclusive start date.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Inclusive end date.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both bounds.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the given date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
