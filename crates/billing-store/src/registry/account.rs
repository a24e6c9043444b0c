//! # Account Registry
//!
//! Accounts keyed by account id.
//!
//! ## Create Flow
//! ```text
//! create(currencies, new)
//!      │
//!      ├── currency unknown?   → NotFound (Currency)
//!      ├── id already taken?   → Conflict (Account)
//!      └── stamp created_at, store, return
//! ```
//!
//! The currency is checked first, so a request that is wrong in both ways
//! reports the missing currency.

use billing_core::{Account, NewAccount};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::currency::CurrencyRegistry;
use super::table::Table;
use crate::error::{Entity, StoreError, StoreResult};

/// Registry of billable accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    table: Table<Account>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        AccountRegistry {
            table: Table::new(),
        }
    }

    /// Stores a validated account, stamped with the current time.
    ///
    /// ## Errors
    /// - `NotFound` if `new.currency_code` is not in `currencies`
    /// - `Conflict` if the account id is already registered
    pub fn create(
        &mut self,
        currencies: &CurrencyRegistry,
        new: NewAccount,
    ) -> StoreResult<&Account> {
        self.create_at(currencies, new, Utc::now())
    }

    /// Same as [`create`](Self::create) with an explicit creation time.
    pub fn create_at(
        &mut self,
        currencies: &CurrencyRegistry,
        new: NewAccount,
        created_at: DateTime<Utc>,
    ) -> StoreResult<&Account> {
        debug!(
            account_id = %new.id,
            currency = %new.currency_code,
            "Creating account"
        );

        currencies.find_one(&new.currency_code)?;

        if self.table.contains(&new.id) {
            return Err(StoreError::conflict(Entity::Account, new.id));
        }

        let id = new.id.clone();
        let account = self
            .table
            .insert(id.clone(), Account::new(new, created_at))
            .ok_or_else(|| StoreError::conflict(Entity::Account, id))?;

        info!(
            account_id = %account.id,
            currency = %account.currency_code,
            created_at = %account.created_at,
            "Account created"
        );
        Ok(account)
    }

    /// Looks up an account by id.
    ///
    /// ## Errors
    /// - `NotFound` if the id is unknown
    pub fn find_one(&self, id: &str) -> StoreResult<&Account> {
        debug!(account_id = %id, "Looking up account");
        self.table
            .get(id)
            .ok_or_else(|| StoreError::not_found(Entity::Account, id))
    }

    /// All accounts in creation order.
    pub fn find_all(&self) -> &[Account] {
        self.table.rows()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.table.contains(id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::{Money, NewCurrency};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn currencies() -> CurrencyRegistry {
        let mut registry = CurrencyRegistry::new();
        registry
            .create(NewCurrency {
                code: "USD".to_string(),
                monthly_fee: Money::from_decimal(dec!(50)),
            })
            .unwrap();
        registry
    }

    fn new_account(id: &str, currency: &str) -> NewAccount {
        NewAccount {
            id: id.to_string(),
            currency_code: currency.to_string(),
            transaction_threshold: dec!(100),
            discount_days: 30,
            discount_rate: dec!(0.2),
        }
    }

    #[test]
    fn test_create_stamps_creation_time() {
        let currencies = currencies();
        let mut accounts = AccountRegistry::new();
        let before = Utc::now();

        let account = accounts.create(&currencies, new_account("acme", "USD")).unwrap();

        assert_eq!(account.id, "acme");
        assert_eq!(account.discount_rate, dec!(0.2));
        assert!(account.created_at >= before);
        assert!(account.created_at <= Utc::now());
    }

    #[test]
    fn test_create_at_uses_given_time() {
        let currencies = currencies();
        let mut accounts = AccountRegistry::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        accounts
            .create_at(&currencies, new_account("acme", "USD"), at)
            .unwrap();

        assert_eq!(accounts.find_one("acme").unwrap().created_at, at);
    }

    #[test]
    fn test_unknown_currency_is_not_found() {
        let currencies = currencies();
        let mut accounts = AccountRegistry::new();

        let err = accounts
            .create(&currencies, new_account("acme", "EUR"))
            .unwrap_err();

        assert_eq!(err, StoreError::not_found(Entity::Currency, "EUR"));
        assert!(accounts.is_empty());
    }

    #[test]
    fn test_duplicate_id_conflicts() {
        let currencies = currencies();
        let mut accounts = AccountRegistry::new();
        accounts.create(&currencies, new_account("acme", "USD")).unwrap();

        let err = accounts
            .create(&currencies, new_account("acme", "USD"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Account acme already exists");
    }

    #[test]
    fn test_missing_currency_reported_before_duplicate() {
        let currencies = currencies();
        let mut accounts = AccountRegistry::new();
        accounts.create(&currencies, new_account("acme", "USD")).unwrap();

        let err = accounts
            .create(&currencies, new_account("acme", "EUR"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                entity: Entity::Currency,
                ..
            }
        ));
    }

    #[test]
    fn test_find_all_in_creation_order() {
        let currencies = currencies();
        let mut accounts = AccountRegistry::new();
        for id in ["zeta", "alpha", "mid"] {
            accounts.create(&currencies, new_account(id, "USD")).unwrap();
        }

        let ids: Vec<&str> = accounts.find_all().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert_eq!(accounts.len(), 3);
        assert!(accounts.find_one("nobody").is_err());
    }
}
