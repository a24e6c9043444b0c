//! # Store Error Types
//!
//! Error types for registry and calculator operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (billing-core)  ← rule broken in a bill request             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)  ← adds NotFound / Conflict                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (billing-api)    ← status code + JSON body                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use billing_core::CoreError;
use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Currency,
    Account,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Currency => f.write_str("Currency"),
            Entity::Account => f.write_str("Account"),
        }
    }
}

/// Registry and calculator errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this key.
    ///
    /// ## When This Occurs
    /// - Looking up an unknown currency or account
    /// - Creating an account for a currency that was never created
    /// - Billing an unknown account
    #[error("{entity} {key} not found")]
    NotFound { entity: Entity, key: String },

    /// A record with this key already exists.
    #[error("{entity} {key} already exists")]
    Conflict { entity: Entity, key: String },

    /// The bill request broke a billing rule.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity and key.
    pub fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Creates a Conflict error for a given entity and key.
    pub fn conflict(entity: Entity, key: impl Into<String>) -> Self {
        StoreError::Conflict {
            entity,
            key: key.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
