//! # Bill Calculator
//!
//! Looks up the stored account and currency and runs the billing-core
//! calculation over them.
//!
//! ## Order of Checks
//! ```text
//! calculate_bill(account_id, request)
//!      │
//!      ├── field missing or wrong type?    → Core(Validation)
//!      ├── request breaks a billing rule?  → Core(InvalidInput)
//!      ├── account unknown?                → NotFound (Account)
//!      ├── account's currency missing?     → NotFound (Currency)
//!      └── compute_breakdown → BillBreakdown
//! ```
//!
//! The request is checked before the lookup, so a bad request for an
//! unknown account reports the bad request.

use billing_core::{compute_breakdown, validate_bill_request, BillBreakdown, CalculateBillRequest};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::registry::account::AccountRegistry;
use crate::registry::currency::CurrencyRegistry;

/// Computes bills for stored accounts. Never mutates the registries.
#[derive(Debug, Clone, Copy)]
pub struct BillCalculator<'a> {
    accounts: &'a AccountRegistry,
    currencies: &'a CurrencyRegistry,
}

impl<'a> BillCalculator<'a> {
    pub fn new(accounts: &'a AccountRegistry, currencies: &'a CurrencyRegistry) -> Self {
        BillCalculator {
            accounts,
            currencies,
        }
    }

    /// Computes the bill for `account_id`, with the one-year bounds taken
    /// from the current time.
    pub fn calculate_bill(
        &self,
        account_id: &str,
        request: &CalculateBillRequest,
    ) -> StoreResult<BillBreakdown> {
        self.calculate_bill_at(account_id, request, Utc::now())
    }

    /// Same as [`calculate_bill`](Self::calculate_bill) with an explicit "now".
    pub fn calculate_bill_at(
        &self,
        account_id: &str,
        request: &CalculateBillRequest,
        now: DateTime<Utc>,
    ) -> StoreResult<BillBreakdown> {
        let window = validate_bill_request(request, now)?;
        debug!(
            account_id = %account_id,
            start = %window.start,
            end = %window.end,
            transaction_count = %window.transaction_count,
            "Calculating bill"
        );

        let account = self.accounts.find_one(account_id)?;
        let currency = self.currencies.find_one(&account.currency_code)?;

        let bill = compute_breakdown(account, currency, &window);

        info!(
            account_id = %bill.account_id,
            total = %bill.total,
            discount_applied = bill.calculations.discount_applied,
            "Bill calculated"
        );
        Ok(bill)
    }
}
