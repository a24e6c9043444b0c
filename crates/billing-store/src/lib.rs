//! # billing-store: In-Memory Registries
//!
//! This crate keeps the currencies and accounts known to the service and
//! runs bill calculations against them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Billing Service Data Flow                         │
//! │                                                                         │
//! │  HTTP handler (POST /accounts/:id/bill)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  billing-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │   Registries   │    │  Calculator  │  │   │
//! │  │   │  (store.rs)   │    │  (registry/)   │    │(calculator.rs│  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ owns both     │───►│ CurrencyReg.   │◄───│ BillCalc.    │  │   │
//! │  │   │ registries    │    │ AccountReg.    │    │ (borrows)    │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  billing-core::calculate_bill (pure)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` that owns both registries
//! - [`registry`] - Currency and account registries
//! - [`calculator`] - Bill calculation over stored records
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use billing_core::{CalculateBillRequest, Money, NewAccount, NewCurrency};
//! use billing_store::Store;
//! use rust_decimal_macros::dec;
//!
//! let mut store = Store::new();
//! store.create_currency(NewCurrency {
//!     code: "USD".into(),
//!     monthly_fee: Money::from_decimal(dec!(50)),
//! })?;
//! store.create_account(NewAccount {
//!     id: "acme".into(),
//!     currency_code: "USD".into(),
//!     transaction_threshold: dec!(100),
//!     discount_days: 0,
//!     discount_rate: dec!(0),
//! })?;
//!
//! assert_eq!(store.currencies().len(), 1);
//! assert!(store.accounts().contains("acme"));
//! # Ok::<(), billing_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod registry;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use calculator::BillCalculator;
pub use error::{Entity, StoreError, StoreResult};
pub use registry::account::AccountRegistry;
pub use registry::currency::CurrencyRegistry;
pub use store::Store;
