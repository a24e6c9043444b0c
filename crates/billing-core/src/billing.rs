//! # Bill Calculation
//!
//! Turns an account, its currency and a bill request into a [`BillBreakdown`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bill Calculation                                 │
//! │                                                                         │
//! │  CalculateBillRequest + now                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_bill_request ─── dates, ordering, ±1 year, count range       │
//! │       │                                                                 │
//! │       ▼  BillingWindow                                                  │
//! │  (caller resolves Account and Currency)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_breakdown                                                     │
//! │       base_fee        = currency.monthly_fee                           │
//! │       over            = max(0, count − threshold)                      │
//! │       transaction_fee = over × £0.10                                   │
//! │       age             = floor(days from created_at to period start)    │
//! │       discount        = (base + fee) × rate   if age ≤ discount_days   │
//! │       total           = base + fee − discount                          │
//! │       round every money field to 2 places                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The account's age is measured at the start of the billing period, not at
//! the time of the request. A bill for a period that starts within the
//! discount window gets the discount even if it is calculated much later.

use chrono::{DateTime, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{CoreError, CoreResult, PeriodBound, ValidationErrors};
use crate::money::Money;
use crate::types::{Account, BillBreakdown, BillCalculations, BillingPeriod, CalculateBillRequest, Currency};
use crate::validation::{read_number, read_string, NumberValue};
use crate::{MAX_TRANSACTION_COUNT, TRANSACTION_FEE_RATE};

const NO_DISCOUNT_REASON: &str = "No discount applicable";

/// Naive forms, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Minute precision with a numeric offset.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// A bill request that passed every rule, with its dates parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Dates as the client sent them, echoed on the bill.
    pub period: BillingPeriod,
    pub transaction_count: Decimal,
}

/// Checks a bill request against the billing rules.
///
/// ## Rules (in order)
/// 0. Both dates are strings and the count is a number, else `Validation`
/// 1. Both dates parse
/// 2. start < end
/// 3. start not before midnight of today one year ago; end not after
///    midnight of today one year ahead
/// 4. 0 ≤ transaction count ≤ 1,000,000
///
/// `now` is passed in so the one-year bounds are testable.
pub fn validate_bill_request(
    request: &CalculateBillRequest,
    now: DateTime<Utc>,
) -> CoreResult<BillingWindow> {
    let mut errors = ValidationErrors::new();
    let start_text = errors.capture(read_string(
        request.billing_period_start.as_ref(),
        "billingPeriodStart",
        "Billing period start",
    ));
    let end_text = errors.capture(read_string(
        request.billing_period_end.as_ref(),
        "billingPeriodEnd",
        "Billing period end",
    ));
    let count = errors.capture(read_number(
        request.transaction_count.as_ref(),
        "transactionCount",
        "Transaction count",
    ));

    let (start_text, end_text, count) = match (start_text, end_text, count) {
        (Some(start), Some(end), Some(count)) if errors.is_empty() => (start, end, count),
        _ => return Err(errors.into()),
    };

    let start = parse_timestamp(start_text).ok_or(CoreError::InvalidDate {
        bound: PeriodBound::Start,
    })?;
    let end = parse_timestamp(end_text).ok_or(CoreError::InvalidDate {
        bound: PeriodBound::End,
    })?;

    if start >= end {
        return Err(CoreError::PeriodNotOrdered);
    }

    let (earliest_start, latest_end) = one_year_bounds(now);
    if start < earliest_start {
        return Err(CoreError::PeriodStartTooOld);
    }
    if end > latest_end {
        return Err(CoreError::PeriodEndTooFar);
    }

    let transaction_count = match count {
        NumberValue::Exact(c) if c < Decimal::ZERO => {
            return Err(CoreError::NegativeTransactionCount)
        }
        NumberValue::Exact(c) if c > MAX_TRANSACTION_COUNT => {
            return Err(CoreError::TransactionCountTooLarge)
        }
        NumberValue::Exact(c) => c,
        NumberValue::OutOfRange { negative: true } => {
            return Err(CoreError::NegativeTransactionCount)
        }
        NumberValue::OutOfRange { negative: false } => {
            return Err(CoreError::TransactionCountTooLarge)
        }
    };

    Ok(BillingWindow {
        start,
        end,
        period: BillingPeriod {
            start: start_text.to_string(),
            end: end_text.to_string(),
        },
        transaction_count,
    })
}

/// Computes the fee breakdown for an already validated request.
///
/// `currency` must be the account's currency; this is not re-checked.
pub fn compute_breakdown(
    account: &Account,
    currency: &Currency,
    window: &BillingWindow,
) -> BillBreakdown {
    let base_fee = currency.monthly_fee;

    let transactions_over_threshold =
        (window.transaction_count - account.transaction_threshold).max(Decimal::ZERO);
    let transaction_fee = TRANSACTION_FEE_RATE.multiply_quantity(transactions_over_threshold);

    let account_age_in_days = account.age_in_days_at(window.start);

    let (discount_amount, discount_applied, discount_reason) =
        if account.discount_applies(account_age_in_days) {
            let subtotal = base_fee + transaction_fee;
            (
                subtotal.percentage(account.discount_rate),
                true,
                discount_reason(account),
            )
        } else {
            (Money::zero(), false, NO_DISCOUNT_REASON.to_string())
        };

    let total = base_fee + transaction_fee - discount_amount;

    BillBreakdown {
        base_fee: base_fee.rounded(),
        transaction_fee: transaction_fee.rounded(),
        discount_amount: discount_amount.rounded(),
        total: total.rounded(),
        currency: account.currency_code.clone(),
        account_id: account.id.clone(),
        billing_period: window.period.clone(),
        calculations: BillCalculations {
            transactions_over_threshold,
            discount_applied,
            discount_reason,
            transaction_fee_rate: TRANSACTION_FEE_RATE,
            account_age_in_days,
        },
    }
}

/// Validates the request and computes the bill in one step.
///
/// ## Example
/// ```rust
/// use billing_core::{calculate_bill, Account, CalculateBillRequest, Currency, Money};
/// use chrono::{Duration, TimeZone, Utc};
/// use rust_decimal_macros::dec;
/// use serde_json::json;
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
/// let created_at = now - Duration::days(5);
/// let currency = Currency { code: "USD".into(), monthly_fee: Money::from_decimal(dec!(50)) };
/// let account = Account {
///     id: "test-account".into(),
///     currency_code: "USD".into(),
///     transaction_threshold: dec!(100),
///     discount_days: 30,
///     discount_rate: dec!(0.2),
///     created_at,
/// };
/// let request: CalculateBillRequest = serde_json::from_value(json!({
///     "billingPeriodStart": (created_at + Duration::days(1)).to_rfc3339(),
///     "billingPeriodEnd": (created_at + Duration::days(2)).to_rfc3339(),
///     "transactionCount": 150,
/// }))?;
///
/// let bill = calculate_bill(&account, &currency, &request, now)?;
/// assert_eq!(bill.transaction_fee.amount(), dec!(5));
/// assert_eq!(bill.discount_amount.amount(), dec!(11));
/// assert_eq!(bill.total.amount(), dec!(44));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn calculate_bill(
    account: &Account,
    currency: &Currency,
    request: &CalculateBillRequest,
    now: DateTime<Utc>,
) -> CoreResult<BillBreakdown> {
    let window = validate_bill_request(request, now)?;
    Ok(compute_breakdown(account, currency, &window))
}

// =============================================================================
// Helpers
// =============================================================================

/// Parses a client timestamp.
///
/// ## Accepted Formats
/// - RFC 3339: `2025-03-01T10:00:00Z`, `2025-03-01T10:00:00.000+01:00`
/// - Minutes only, with `Z` or an offset: `2025-03-01T10:00Z`, `2025-03-01T10:00+01:00`
/// - Date-time without offset (read as UTC): `2025-03-01T10:00:00`, `2025-03-01T10:00`
/// - Date only (UTC midnight): `2025-03-01`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::<FixedOffset>::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    // `Z` is UTC, same as no offset
    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
    {
        return Some(Utc.from_utc_datetime(&dt));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Midnight (UTC) of today's date, twelve months back and twelve months ahead.
fn one_year_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    let year = Months::new(12);

    let earliest = today.checked_sub_months(year).unwrap_or(NaiveDate::MIN);
    let latest = today.checked_add_months(year).unwrap_or(NaiveDate::MAX);

    (
        Utc.from_utc_datetime(&earliest.and_time(NaiveTime::MIN)),
        Utc.from_utc_datetime(&latest.and_time(NaiveTime::MIN)),
    )
}

fn discount_reason(account: &Account) -> String {
    let percent = (account.discount_rate * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}% promotional discount for new accounts", percent)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 14, 30, 0).unwrap()
    }

    fn usd(fee: Decimal) -> Currency {
        Currency {
            code: "USD".to_string(),
            monthly_fee: Money::from_decimal(fee),
        }
    }

    /// Account created five days before `now()`.
    fn test_account() -> Account {
        Account {
            id: "test-account".to_string(),
            currency_code: "USD".to_string(),
            transaction_threshold: dec!(100),
            discount_days: 30,
            discount_rate: dec!(0.2),
            created_at: now() - Duration::days(5),
        }
    }

    /// Request for one day, starting `start_offset_days` after account creation.
    fn request_after_creation(
        account: &Account,
        start_offset_days: i64,
        transaction_count: i64,
    ) -> CalculateBillRequest {
        CalculateBillRequest {
            billing_period_start: Some(json!(
                (account.created_at + Duration::days(start_offset_days)).to_rfc3339()
            )),
            billing_period_end: Some(json!(
                (account.created_at + Duration::days(start_offset_days + 1)).to_rfc3339()
            )),
            transaction_count: Some(json!(transaction_count)),
        }
    }

    fn request(start: &str, end: &str, transaction_count: Value) -> CalculateBillRequest {
        CalculateBillRequest {
            billing_period_start: Some(json!(start)),
            billing_period_end: Some(json!(end)),
            transaction_count: Some(transaction_count),
        }
    }

    #[test]
    fn test_base_fee_only_below_threshold() {
        let account = test_account();
        let req = request_after_creation(&account, 35, 50);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.base_fee.amount(), dec!(50));
        assert_eq!(bill.transaction_fee.amount(), dec!(0));
        assert_eq!(bill.discount_amount.amount(), dec!(0));
        assert_eq!(bill.total.amount(), dec!(50));
        assert_eq!(bill.calculations.transactions_over_threshold, Decimal::ZERO);
        assert!(!bill.calculations.discount_applied);
        assert_eq!(bill.calculations.discount_reason, "No discount applicable");
    }

    #[test]
    fn test_count_equal_to_threshold_has_no_overage() {
        let account = test_account();
        let req = request_after_creation(&account, 35, 100);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.calculations.transactions_over_threshold, Decimal::ZERO);
        assert_eq!(bill.transaction_fee.amount(), dec!(0));
    }

    #[test]
    fn test_transaction_fee_above_threshold() {
        let account = test_account();
        let req = request_after_creation(&account, 35, 150);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.base_fee.amount(), dec!(50));
        assert_eq!(bill.transaction_fee.amount(), dec!(5));
        assert_eq!(bill.calculations.transactions_over_threshold, dec!(50));
        assert_eq!(bill.calculations.transaction_fee_rate.amount(), dec!(0.10));
    }

    #[test]
    fn test_fractional_threshold_bills_fractional_overage() {
        let mut account = test_account();
        account.transaction_threshold = dec!(100.5);
        let req = request_after_creation(&account, 35, 150);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.calculations.transactions_over_threshold, dec!(49.5));
        assert_eq!(bill.transaction_fee.amount(), dec!(4.95));
        assert_eq!(bill.total.amount(), dec!(54.95));
    }

    #[test]
    fn test_fractional_count_is_billed() {
        let account = test_account();
        let req = request("2025-06-16", "2025-07-16", json!(120.25));

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.calculations.transactions_over_threshold, dec!(20.25));
        // 2.025 rounds half away from zero
        assert_eq!(bill.transaction_fee.amount(), dec!(2.03));
    }

    #[test]
    fn test_promotional_discount_for_new_account() {
        let account = test_account();
        let req = request_after_creation(&account, 1, 150);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.base_fee.amount(), dec!(50));
        assert_eq!(bill.transaction_fee.amount(), dec!(5));
        assert_eq!(bill.discount_amount.amount(), dec!(11)); // 20% of 55
        assert_eq!(bill.total.amount(), dec!(44));
        assert!(bill.calculations.discount_applied);
        assert_eq!(bill.calculations.account_age_in_days, 1);
        assert_eq!(
            bill.calculations.discount_reason,
            "20.0% promotional discount for new accounts"
        );
    }

    #[test]
    fn test_discount_on_last_day_of_window() {
        let account = test_account();
        let req = request_after_creation(&account, 30, 0);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert!(bill.calculations.discount_applied);
        assert_eq!(bill.total.amount(), dec!(40));
    }

    #[test]
    fn test_no_discount_for_old_account() {
        let mut account = test_account();
        account.discount_rate = dec!(0.9);
        let req = request_after_creation(&account, 31, 150);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.discount_amount.amount(), dec!(0));
        assert!(!bill.calculations.discount_applied);
        assert_eq!(bill.calculations.account_age_in_days, 31);
        assert_eq!(bill.total.amount(), dec!(55));
    }

    #[test]
    fn test_zero_rate_never_discounts() {
        let mut account = test_account();
        account.discount_rate = Decimal::ZERO;
        let req = request_after_creation(&account, 1, 150);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert!(!bill.calculations.discount_applied);
        assert_eq!(bill.total.amount(), dec!(55));
    }

    #[test]
    fn test_period_before_creation_counts_as_new() {
        let account = test_account();
        let req = request_after_creation(&account, -3, 0);

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.calculations.account_age_in_days, -3);
        assert!(bill.calculations.discount_applied);
    }

    #[test]
    fn test_money_fields_rounded_to_two_places() {
        let mut account = test_account();
        account.discount_rate = dec!(0.333);
        let req = request_after_creation(&account, 1, 107);

        let bill = calculate_bill(&account, &usd(dec!(19.999)), &req, now()).unwrap();

        // 19.999 + 0.7 = 20.699; × 0.333 = 6.892767; total 13.806233
        assert_eq!(bill.base_fee.amount().to_string(), "20.00");
        assert_eq!(bill.transaction_fee.amount().to_string(), "0.70");
        assert_eq!(bill.discount_amount.amount().to_string(), "6.89");
        assert_eq!(bill.total.amount().to_string(), "13.81");
        assert_eq!(
            bill.calculations.discount_reason,
            "33.3% promotional discount for new accounts"
        );
    }

    #[test]
    fn test_period_strings_echoed() {
        let account = test_account();
        let req = request("2025-06-16", "2025-07-16T00:00:00Z", json!(0));

        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        assert_eq!(bill.billing_period.start, "2025-06-16");
        assert_eq!(bill.billing_period.end, "2025-07-16T00:00:00Z");
        assert_eq!(bill.account_id, "test-account");
        assert_eq!(bill.currency, "USD");
    }

    #[test]
    fn test_unparsable_dates() {
        let err =
            validate_bill_request(&request("yesterday", "2025-07-01", json!(1)), now()).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDate {
                bound: PeriodBound::Start
            }
        );

        let err =
            validate_bill_request(&request("2025-07-01", "2025-07-32", json!(1)), now()).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDate {
                bound: PeriodBound::End
            }
        );
    }

    #[test]
    fn test_start_must_be_before_end() {
        let err =
            validate_bill_request(&request("2025-06-25", "2025-06-20", json!(100)), now()).unwrap_err();
        assert_eq!(err, CoreError::PeriodNotOrdered);

        let err =
            validate_bill_request(&request("2025-06-20", "2025-06-20", json!(100)), now()).unwrap_err();
        assert_eq!(err, CoreError::PeriodNotOrdered);
    }

    #[test]
    fn test_one_year_bounds() {
        // Lower bound is 2024-06-15T00:00:00Z
        assert!(validate_bill_request(&request("2024-06-15", "2024-07-15", json!(0)), now()).is_ok());
        let err = validate_bill_request(
            &request("2024-06-14T23:59:59Z", "2024-07-15", json!(0)),
            now(),
        )
        .unwrap_err();
        assert_eq!(err, CoreError::PeriodStartTooOld);

        // Upper bound is 2026-06-15T00:00:00Z
        assert!(validate_bill_request(&request("2026-05-15", "2026-06-15", json!(0)), now()).is_ok());
        let err = validate_bill_request(
            &request("2026-05-15", "2026-06-15T00:00:01Z", json!(0)),
            now(),
        )
        .unwrap_err();
        assert_eq!(err, CoreError::PeriodEndTooFar);
    }

    #[test]
    fn test_transaction_count_range() {
        let err =
            validate_bill_request(&request("2025-06-16", "2025-07-16", json!(-10)), now()).unwrap_err();
        assert_eq!(err, CoreError::NegativeTransactionCount);

        let req = request("2025-06-16", "2025-07-16", json!(1000000.5));
        let err = validate_bill_request(&req, now()).unwrap_err();
        assert_eq!(err, CoreError::TransactionCountTooLarge);

        let req = request("2025-06-16", "2025-07-16", json!(1000000));
        let window = validate_bill_request(&req, now()).unwrap();
        assert_eq!(window.transaction_count, MAX_TRANSACTION_COUNT);
    }

    #[test]
    fn test_huge_counts_hit_the_range_rules() {
        // beyond i64 and u64
        for huge in [json!(10_000_000_000_000_000_000u64), json!(1e30), json!(1e300)] {
            let req = request("2025-06-16", "2025-07-16", huge);
            let err = validate_bill_request(&req, now()).unwrap_err();
            assert_eq!(err, CoreError::TransactionCountTooLarge);
        }

        let req = request("2025-06-16", "2025-07-16", json!(-1e300));
        let err = validate_bill_request(&req, now()).unwrap_err();
        assert_eq!(err, CoreError::NegativeTransactionCount);
    }

    #[test]
    fn test_wrong_types_are_field_errors() {
        let req = CalculateBillRequest {
            billing_period_start: Some(json!(20250616)),
            billing_period_end: None,
            transaction_count: Some(json!("150")),
        };

        let errors = match validate_bill_request(&req, now()) {
            Err(CoreError::Validation(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        };
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Billing period start must be a string",
                "Billing period end is required",
                "Transaction count must be a number",
            ]
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2025-03-01"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T01:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T00:00:00"), Some(expected));

        // minute precision
        assert_eq!(parse_timestamp("2025-03-01T00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T01:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-02-28T19:00-0500"), Some(expected));

        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2025-13-01"), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2025-03-01T25:00Z"), None);
    }

    #[test]
    fn test_breakdown_wire_format() {
        let account = test_account();
        let req = request_after_creation(&account, 1, 150);
        let bill = calculate_bill(&account, &usd(dec!(50)), &req, now()).unwrap();

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["baseFeeGbp"], 50.0);
        assert_eq!(json["transactionFeeGbp"], 5.0);
        assert_eq!(json["discountAmountGbp"], 11.0);
        assert_eq!(json["totalGbp"], 44.0);
        assert_eq!(json["accountId"], "test-account");
        assert_eq!(json["calculations"]["transactionsOverThreshold"], 50.0);
        assert_eq!(json["calculations"]["transactionFeeRateGbp"], 0.1);
        assert_eq!(json["calculations"]["discountApplied"], true);
        assert!(json["billingPeriod"]["start"].is_string());
    }
}
