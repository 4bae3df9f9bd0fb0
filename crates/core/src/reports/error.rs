//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A reporting request arrived without a complete date range.
    #[error("Missing date range: {field} is required")]
    MissingDateRange {
        /// Which bound is missing ("start" or "end").
        field: &'static str,
    },

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDateRange { .. } => "MISSING_DATE_RANGE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<ReportError> for stockbook_shared::AppError {
    fn from(err: ReportError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ReportError::MissingDateRange { field: "start" }.error_code(),
            "MISSING_DATE_RANGE"
        );
        assert_eq!(
            ReportError::InvalidDateRange {
                start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            }
            .error_code(),
            "INVALID_DATE_RANGE"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ReportError::MissingDateRange { field: "end" }.to_string(),
            "Missing date range: end is required"
        );
        assert_eq!(
            ReportError::InvalidDateRange {
                start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            }
            .to_string(),
            "Invalid date range: start 2026-02-01 is after end 2026-01-01"
        );
    }
}
