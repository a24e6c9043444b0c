//! # billing-core: Pure Billing Logic
//!
//! This crate holds everything about a bill that can be decided without
//! touching storage, the network, or the clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Billing Service Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  billing-api (axum HTTP)                        │   │
//! │  │   POST /currencies   POST /accounts   POST /accounts/:id/bill   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                billing-store (in-memory)                        │   │
//! │  │   CurrencyRegistry   AccountRegistry   BillCalculator           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ billing-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ validation│  │   │
//! │  │   │ Currency  │  │   Money   │  │ calculate │  │  fields   │  │   │
//! │  │   │ Account   │  │ rounding  │  │   _bill   │  │  errors   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Currency, Account, BillBreakdown) and request bodies
//! - [`money`] - Money type over an exact decimal
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation and raw JSON field readers
//! - [`billing`] - The bill calculation
//!
//! ## Example Usage
//!
//! ```rust
//! use billing_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let subtotal = Money::from_decimal(dec!(55));
//! let discount = subtotal.percentage(dec!(0.2));
//! assert_eq!(discount.rounded().amount(), dec!(11.00));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{calculate_bill, compute_breakdown, validate_bill_request, BillingWindow};
pub use error::{CoreError, CoreResult, PeriodBound, ValidationError, ValidationErrors};
pub use money::Money;
pub use types::*;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Charge for every transaction above an account's threshold (£0.10).
pub const TRANSACTION_FEE_RATE: Money = Money::from_decimal(dec!(0.10));

/// Upper bound for a currency's monthly fee.
pub const MAX_MONTHLY_FEE: Decimal = dec!(10000);

/// Upper bound for the transaction count submitted with a bill request.
///
/// ## Business Reason
/// Catches typos and runaway counters before they turn into a huge bill.
pub const MAX_TRANSACTION_COUNT: Decimal = dec!(1000000);

/// Length of a currency code (`USD`, `EUR`, `GBP`).
pub const CURRENCY_CODE_LEN: usize = 3;
