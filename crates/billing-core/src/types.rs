//! # Domain Types
//!
//! Core domain types and request bodies used throughout the billing service.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │    Currency     │◄──│       Account        │   │  BillBreakdown  │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  code (key)     │   │  id (key)            │   │  base_fee       │  │
//! │  │  monthly_fee    │   │  currency_code (FK)  │   │  transaction_fee│  │
//! │  └─────────────────┘   │  transaction_thresh. │   │  discount_amount│  │
//! │                        │  discount_days       │   │  total          │  │
//! │                        │  discount_rate       │   │  calculations   │  │
//! │                        │  created_at          │   └─────────────────┘  │
//! │                        └──────────────────────┘    (derived, never     │
//! │                                                      stored)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names on the wire are the ones existing clients already use
//! (`currency`, `monthlyFeeGbp`, `accountId`, `baseFeeGbp`, ...). The Rust
//! names say what the field is; serde renames bridge the two.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::money::Money;

// =============================================================================
// Currency
// =============================================================================

/// A billing currency and the flat monthly fee charged in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Three-letter uppercase code, unique key.
    #[serde(rename = "currency")]
    pub code: String,

    /// Flat fee charged every billing period.
    #[serde(rename = "monthlyFeeGbp")]
    pub monthly_fee: Money,
}

/// A validated currency, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurrency {
    pub code: String,
    pub monthly_fee: Money,
}

impl From<NewCurrency> for Currency {
    fn from(new: NewCurrency) -> Self {
        Currency {
            code: new.code,
            monthly_fee: new.monthly_fee,
        }
    }
}

// =============================================================================
// Account
// =============================================================================

/// A billable account with its overage and promotional discount policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Business identifier: letters, digits, hyphens, underscores.
    #[serde(rename = "accountId")]
    pub id: String,

    /// Code of the currency this account is billed in.
    #[serde(rename = "currency")]
    pub currency_code: String,

    /// Transactions included in the monthly fee. May be fractional.
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_threshold: Decimal,

    /// Days after creation during which the discount applies.
    pub discount_days: i64,

    /// Discount as a fraction in [0, 1].
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_rate: Decimal,

    /// Set once when the account is stored.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Builds the stored record for a validated account.
    pub fn new(new: NewAccount, created_at: DateTime<Utc>) -> Self {
        Account {
            id: new.id,
            currency_code: new.currency_code,
            transaction_threshold: new.transaction_threshold,
            discount_days: new.discount_days,
            discount_rate: new.discount_rate,
            created_at,
        }
    }

    /// Whole days between creation and `at`, rounded down.
    ///
    /// Negative when `at` is before the account existed.
    pub fn age_in_days_at(&self, at: DateTime<Utc>) -> i64 {
        const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
        (at - self.created_at)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY)
    }

    /// Whether an account of the given age still gets the promotional discount.
    pub fn discount_applies(&self, age_in_days: i64) -> bool {
        age_in_days <= self.discount_days && self.discount_rate > Decimal::ZERO
    }
}

/// A validated account, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub id: String,
    pub currency_code: String,
    pub transaction_threshold: Decimal,
    pub discount_days: i64,
    pub discount_rate: Decimal,
}

// =============================================================================
// Bill Breakdown
// =============================================================================

/// The period a bill covers, echoed exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: String,
    pub end: String,
}

/// How the fees in a [`BillBreakdown`] were reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCalculations {
    #[serde(with = "rust_decimal::serde::float")]
    pub transactions_over_threshold: Decimal,
    pub discount_applied: bool,
    pub discount_reason: String,
    #[serde(rename = "transactionFeeRateGbp")]
    pub transaction_fee_rate: Money,
    /// Measured at the start of the billing period.
    pub account_age_in_days: i64,
}

/// A computed bill. Derived on request, never stored.
///
/// All money fields are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillBreakdown {
    #[serde(rename = "baseFeeGbp")]
    pub base_fee: Money,
    #[serde(rename = "transactionFeeGbp")]
    pub transaction_fee: Money,
    #[serde(rename = "discountAmountGbp")]
    pub discount_amount: Money,
    #[serde(rename = "totalGbp")]
    pub total: Money,
    pub currency: String,
    pub account_id: String,
    pub billing_period: BillingPeriod,
    pub calculations: BillCalculations,
}

// =============================================================================
// Request Bodies
// =============================================================================
// Fields arrive as raw JSON values. Validation reads them, so a missing
// field or a value of the wrong type becomes a field-level message instead
// of a parse error.

/// Body of `POST /currencies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCurrencyRequest {
    #[serde(default)]
    pub currency: Option<Value>,

    #[serde(default)]
    pub monthly_fee_gbp: Option<Value>,
}

/// Body of `POST /accounts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub account_id: Option<Value>,

    #[serde(default)]
    pub currency: Option<Value>,

    #[serde(default)]
    pub transaction_threshold: Option<Value>,

    #[serde(default)]
    pub discount_days: Option<Value>,

    #[serde(default)]
    pub discount_rate: Option<Value>,
}

/// Body of `POST /accounts/:accountId/bill`.
///
/// Dates stay strings here; parsing them is part of the calculation so that
/// a bad date is reported as an invalid bill request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CalculateBillRequest {
    #[serde(default)]
    pub billing_period_start: Option<Value>,

    #[serde(default)]
    pub billing_period_end: Option<Value>,

    #[serde(default)]
    pub transaction_count: Option<Value>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn account(discount_days: i64, discount_rate: Decimal) -> Account {
        Account {
            id: "acc-1".to_string(),
            currency_code: "GBP".to_string(),
            transaction_threshold: dec!(100),
            discount_days,
            discount_rate,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_age_rounds_down() {
        let acc = account(30, dec!(0.2));
        let created = acc.created_at;

        assert_eq!(acc.age_in_days_at(created), 0);
        assert_eq!(acc.age_in_days_at(created + Duration::hours(23)), 0);
        assert_eq!(acc.age_in_days_at(created + Duration::days(1)), 1);
        assert_eq!(acc.age_in_days_at(created + Duration::hours(35 * 24 + 5)), 35);
    }

    #[test]
    fn test_age_before_creation_is_negative() {
        let acc = account(30, dec!(0.2));
        assert_eq!(acc.age_in_days_at(acc.created_at - Duration::hours(1)), -1);
        assert_eq!(acc.age_in_days_at(acc.created_at - Duration::days(2)), -2);
    }

    #[test]
    fn test_discount_applies() {
        let acc = account(30, dec!(0.2));
        assert!(acc.discount_applies(0));
        assert!(acc.discount_applies(30));
        assert!(!acc.discount_applies(31));

        let no_rate = account(30, Decimal::ZERO);
        assert!(!no_rate.discount_applies(1));
    }

    #[test]
    fn test_account_wire_names() {
        let json = serde_json::to_value(account(30, dec!(0.15))).unwrap();
        assert_eq!(json["accountId"], "acc-1");
        assert_eq!(json["currency"], "GBP");
        assert_eq!(json["transactionThreshold"], 100.0);
        assert_eq!(json["discountDays"], 30);
        assert_eq!(json["discountRate"], 0.15);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_create_currency_request_rejects_unknown_fields() {
        let parsed: Result<CreateCurrencyRequest, _> =
            serde_json::from_str(r#"{"currency":"USD","monthlyFeeGbp":25,"extra":1}"#);
        assert!(parsed.is_err());

        let parsed: CreateCurrencyRequest =
            serde_json::from_str(r#"{"currency":"USD","monthlyFeeGbp":25.5}"#).unwrap();
        assert_eq!(parsed.currency, Some(json!("USD")));
        assert_eq!(parsed.monthly_fee_gbp, Some(json!(25.5)));
    }

    #[test]
    fn test_wrong_types_still_parse() {
        let parsed: CreateAccountRequest = serde_json::from_str(
            r#"{"accountId":7,"transactionThreshold":"lots","discountDays":null}"#,
        )
        .unwrap();
        assert_eq!(parsed.account_id, Some(json!(7)));
        assert_eq!(parsed.transaction_threshold, Some(json!("lots")));
        assert!(parsed.discount_days.is_none());
    }

    #[test]
    fn test_create_account_request_missing_fields_are_none() {
        let parsed: CreateAccountRequest = serde_json::from_str(r#"{"accountId":"a"}"#).unwrap();
        assert_eq!(parsed.account_id, Some(json!("a")));
        assert!(parsed.currency.is_none());
        assert!(parsed.discount_rate.is_none());
    }
}
