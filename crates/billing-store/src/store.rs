//! # Store
//!
//! Owns both registries for the lifetime of the process.
//!
//! `Store` itself is not synchronized. The API wraps it in an
//! `Arc<RwLock<Store>>`: creates take the write lock, reads and bill
//! calculations take the read lock.

use billing_core::{Account, Currency, NewAccount, NewCurrency};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::calculator::BillCalculator;
use crate::error::StoreResult;
use crate::registry::account::AccountRegistry;
use crate::registry::currency::CurrencyRegistry;

/// All billing state held by the service.
///
/// ## Usage
/// ```rust,ignore
/// let store = Arc::new(RwLock::new(Store::new()));
///
/// // Writes
/// store.write().await.create_currency(new_currency)?;
///
/// // Reads
/// let bill = store.read().await.bill_calculator().calculate_bill("acme", &request)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    currencies: CurrencyRegistry,
    accounts: AccountRegistry,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        info!("Initializing in-memory billing store");
        Store {
            currencies: CurrencyRegistry::new(),
            accounts: AccountRegistry::new(),
        }
    }

    /// Returns the currency registry.
    pub fn currencies(&self) -> &CurrencyRegistry {
        &self.currencies
    }

    /// Returns the account registry.
    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    pub fn create_currency(&mut self, new: NewCurrency) -> StoreResult<&Currency> {
        self.currencies.create(new)
    }

    /// Creates an account, checking its currency against this store.
    pub fn create_account(&mut self, new: NewAccount) -> StoreResult<&Account> {
        let Store {
            currencies,
            accounts,
        } = self;
        accounts.create(currencies, new)
    }

    /// Same as [`create_account`](Self::create_account) with an explicit
    /// creation time.
    pub fn create_account_at(
        &mut self,
        new: NewAccount,
        created_at: DateTime<Utc>,
    ) -> StoreResult<&Account> {
        let Store {
            currencies,
            accounts,
        } = self;
        accounts.create_at(currencies, new, created_at)
    }

    /// Returns a calculator that reads from this store.
    pub fn bill_calculator(&self) -> BillCalculator<'_> {
        BillCalculator::new(&self.accounts, &self.currencies)
    }
}
