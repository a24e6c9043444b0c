//! # Currency Registry
//!
//! Currencies keyed by their three-letter code.
//!
//! Codes are compared exactly: validation has already enforced uppercase,
//! so `usd` never reaches this registry.

use billing_core::{Currency, NewCurrency};
use tracing::{debug, info};

use super::table::Table;
use crate::error::{Entity, StoreError, StoreResult};

/// Registry of billing currencies.
///
/// ## Usage
/// ```rust
/// use billing_core::{Money, NewCurrency};
/// use billing_store::CurrencyRegistry;
/// use rust_decimal_macros::dec;
///
/// let mut currencies = CurrencyRegistry::new();
/// currencies.create(NewCurrency {
///     code: "EUR".into(),
///     monthly_fee: Money::from_decimal(dec!(25)),
/// })?;
///
/// let eur = currencies.find_one("EUR")?;
/// assert_eq!(eur.monthly_fee.amount(), dec!(25));
/// # Ok::<(), billing_store::StoreError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    table: Table<Currency>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        CurrencyRegistry {
            table: Table::new(),
        }
    }

    /// Stores a validated currency.
    ///
    /// ## Errors
    /// - `Conflict` if the code is already registered
    pub fn create(&mut self, new: NewCurrency) -> StoreResult<&Currency> {
        let code = new.code.clone();
        debug!(currency = %code, monthly_fee = %new.monthly_fee, "Creating currency");

        let currency = self
            .table
            .insert(code.clone(), Currency::from(new))
            .ok_or_else(|| StoreError::conflict(Entity::Currency, code.as_str()))?;

        info!(currency = %currency.code, "Currency created");
        Ok(currency)
    }

    /// Looks up a currency by code.
    ///
    /// ## Errors
    /// - `NotFound` if the code is unknown
    pub fn find_one(&self, code: &str) -> StoreResult<&Currency> {
        debug!(currency = %code, "Looking up currency");
        self.table
            .get(code)
            .ok_or_else(|| StoreError::not_found(Entity::Currency, code))
    }

    /// All currencies in creation order.
    pub fn find_all(&self) -> &[Currency] {
        self.table.rows()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.table.contains(code)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
}
