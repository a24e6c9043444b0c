//! # Error Types
//!
//! Domain-specific error types for billing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billing-core errors (this file)                                       │
//! │  ├── ValidationError   - One field failed a rule                       │
//! │  ├── ValidationErrors  - Every field failure of one request            │
//! │  └── CoreError         - Bill request rejected (InvalidInput)          │
//! │                                                                         │
//! │  billing-store errors (separate crate)                                 │
//! │  └── StoreError        - NotFound / Conflict / CoreError               │
//! │                                                                         │
//! │  billing-api errors                                                    │
//! │  └── ApiError          - What HTTP clients see (status + JSON body)    │
//! │                                                                         │
//! │  Flow: ValidationErrors → CoreError → StoreError → ApiError → Client   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are written for the person calling the API, so they are used
//! verbatim in response bodies.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field that failed validation.
///
/// `field` is the wire name of the field (`monthlyFeeGbp`), `label` is the
/// human name used in the message ("Monthly fee").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{label} is required")]
    Required {
        field: &'static str,
        label: &'static str,
    },

    /// Value does not have the expected shape.
    #[error("{label} {reason}")]
    InvalidFormat {
        field: &'static str,
        label: &'static str,
        reason: &'static str,
    },

    /// Value is present but not a JSON number.
    #[error("{label} must be a number")]
    NotANumber {
        field: &'static str,
        label: &'static str,
    },

    /// Value is present but not a JSON string.
    #[error("{label} must be a string")]
    NotAString {
        field: &'static str,
        label: &'static str,
    },

    /// Value is a number too large in magnitude to hold.
    #[error("{label} is out of range")]
    OutOfRange {
        field: &'static str,
        label: &'static str,
    },

    /// Value must be strictly greater than zero.
    #[error("{label} must be a positive number")]
    MustBePositive {
        field: &'static str,
        label: &'static str,
    },

    /// Value must be zero or greater.
    #[error("{label} cannot be negative")]
    Negative {
        field: &'static str,
        label: &'static str,
    },

    /// Value is above the allowed maximum.
    #[error("{label} cannot exceed {max}")]
    TooLarge {
        field: &'static str,
        label: &'static str,
        max: &'static str,
    },
}

impl ValidationError {
    /// Wire name of the field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotAString { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::TooLarge { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Errors (the list)
// =============================================================================

/// Every field failure found while validating one request.
///
/// Validators collect into this instead of stopping at the first bad field,
/// so a client can fix a whole form in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty list.
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Stores the value of `result` in `slot`, or records its error.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::{ValidationError, ValidationErrors};
    ///
    /// let mut errors = ValidationErrors::new();
    /// let ok: Option<i64> = errors.capture(Ok(5));
    /// let bad: Option<i64> = errors.capture(Err(ValidationError::Required {
    ///     field: "x",
    ///     label: "X",
    /// }));
    /// assert_eq!(ok, Some(5));
    /// assert!(bad.is_none());
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn capture<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Core Error
// =============================================================================

/// Which end of a billing period an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodBound {
    Start,
    End,
}

impl fmt::Display for PeriodBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodBound::Start => f.write_str("start"),
            PeriodBound::End => f.write_str("end"),
        }
    }
}

/// Bill request rejected before any fee is computed.
///
/// Every variant except `Validation` is an InvalidInput failure: the request
/// is well typed, but breaks a billing rule.
///
/// ## When This Occurs
/// ```text
/// calculate_bill(request)
///      │
///      ├── field missing or wrong type?  → Validation
///      ├── date unparsable?          → InvalidDate
///      ├── start >= end?             → PeriodNotOrdered
///      ├── start < today - 1 year?   → PeriodStartTooOld
///      ├── end > today + 1 year?     → PeriodEndTooFar
///      ├── count < 0?                → NegativeTransactionCount
///      └── count > 1,000,000?        → TransactionCountTooLarge
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid billing period {bound} date format")]
    InvalidDate { bound: PeriodBound },

    #[error("Billing period start must be before end date")]
    PeriodNotOrdered,

    #[error("Billing period start cannot be more than one year in the past")]
    PeriodStartTooOld,

    #[error("Billing period end cannot be more than one year in the future")]
    PeriodEndTooFar,

    #[error("Transaction count cannot be negative")]
    NegativeTransactionCount,

    #[error("Transaction count cannot exceed 1,000,000")]
    TransactionCountTooLarge,

    /// Bill request fields missing or of the wrong JSON type.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
