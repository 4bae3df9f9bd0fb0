//! Stock ledger error types.
//!
//! This module defines all errors that can occur during stock ledger
//! operations: lookup failures, duplicate identities, oversell attempts,
//! and invalid inputs.

use stockbook_shared::types::ItemId;
use thiserror::Error;

/// Errors that can occur during stock ledger operations.
#[derive(Debug, Error)]
pub enum StockError {
    // ========== Lookup Errors ==========
    /// Item does not resolve.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// No batch with this number exists for the item.
    #[error("Batch {batch_number} not found for item {item_id}")]
    BatchNotFound {
        /// The item the batch was looked up under.
        item_id: ItemId,
        /// The batch number that did not resolve.
        batch_number: String,
    },

    /// No serialized unit with this serial number exists.
    #[error("Serial number not found: {0}")]
    SerialNotFound(String),

    // ========== Conflict Errors ==========
    /// A batch with this number already exists for the item.
    #[error("Batch {batch_number} already exists for item {item_id}")]
    DuplicateBatch {
        /// The item the duplicate was received under.
        item_id: ItemId,
        /// The batch number already in use.
        batch_number: String,
    },

    /// A serialized unit with this serial number already exists.
    #[error("Serial number already exists: {0}")]
    DuplicateSerial(String),

    // ========== Quantity Errors ==========
    /// Requested quantity exceeds what the batch has available.
    #[error(
        "Insufficient stock in batch {batch_number}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The batch that could not cover the request.
        batch_number: String,
        /// The quantity requested.
        requested: i64,
        /// The quantity actually available.
        available: i64,
    },

    /// Adjustment or restore would push availability above the purchased quantity.
    #[error(
        "Batch {batch_number} capacity exceeded: resulting quantity {requested} is above purchase quantity {capacity}"
    )]
    ExceedsBatchCapacity {
        /// The batch being adjusted.
        batch_number: String,
        /// The availability the operation would produce.
        requested: i64,
        /// The batch's purchase quantity.
        capacity: i64,
    },

    /// The serialized unit was already sold.
    #[error("Serialized unit already sold: {0}")]
    AlreadySold(String),

    /// The serialized unit is not sold, nothing to restore.
    #[error("Serialized unit is not sold: {0}")]
    SerialNotSold(String),

    /// Restore quantity exceeds what was sold from the batch.
    #[error("Nothing to restore in batch {batch_number}: requested {requested}, sold {sold}")]
    NothingToRestore {
        /// The batch being restored into.
        batch_number: String,
        /// The quantity requested back.
        requested: i64,
        /// The quantity actually sold from the batch.
        sold: i64,
    },

    // ========== Validation Errors ==========
    /// Quantity must be positive.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Costs and prices cannot be negative.
    #[error("Cost or price cannot be negative")]
    NegativeCost,

    // ========== Store Errors ==========
    /// Data store error.
    #[error("Store error: {0}")]
    Store(String),
}

impl StockError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::BatchNotFound { .. } => "BATCH_NOT_FOUND",
            Self::SerialNotFound(_) => "SERIAL_NOT_FOUND",
            Self::DuplicateBatch { .. } => "DUPLICATE_BATCH",
            Self::DuplicateSerial(_) => "DUPLICATE_SERIAL",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::ExceedsBatchCapacity { .. } => "EXCEEDS_BATCH_CAPACITY",
            Self::AlreadySold(_) => "ALREADY_SOLD",
            Self::SerialNotSold(_) => "SERIAL_NOT_SOLD",
            Self::NothingToRestore { .. } => "NOTHING_TO_RESTORE",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::NegativeCost => "NEGATIVE_COST",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 404 Not Found
            Self::ItemNotFound(_) | Self::BatchNotFound { .. } | Self::SerialNotFound(_) => 404,

            // 409 Conflict - duplicate identities and exhausted units
            Self::DuplicateBatch { .. } | Self::DuplicateSerial(_) | Self::AlreadySold(_) => 409,

            // 422 Unprocessable - business rule violations
            Self::InsufficientStock { .. }
            | Self::ExceedsBatchCapacity { .. }
            | Self::SerialNotSold(_)
            | Self::NothingToRestore { .. } => 422,

            // 400 Bad Request - validation errors
            Self::InvalidQuantity(_) | Self::NegativeCost => 400,

            // 500 Internal Server Error
            Self::Store(_) => 500,
        }
    }

    /// Returns true if this error is safe to retry without an idempotency key.
    ///
    /// Consume operations must carry a caller-supplied key when retried;
    /// everything else is read-only or naturally idempotent.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<StockError> for stockbook_shared::AppError {
    fn from(err: StockError) -> Self {
        match &err {
            StockError::ItemNotFound(_)
            | StockError::BatchNotFound { .. }
            | StockError::SerialNotFound(_) => Self::NotFound(err.to_string()),
            StockError::DuplicateBatch { .. } | StockError::DuplicateSerial(_) => {
                Self::Conflict(err.to_string())
            }
            StockError::InsufficientStock { .. }
            | StockError::ExceedsBatchCapacity { .. }
            | StockError::AlreadySold(_)
            | StockError::SerialNotSold(_)
            | StockError::NothingToRestore { .. } => Self::BusinessRule(err.to_string()),
            StockError::InvalidQuantity(_) | StockError::NegativeCost => {
                Self::Validation(err.to_string())
            }
            StockError::Store(_) => Self::Store(err.to_string()),
        }
    }
}
