//! # Validation Module
//!
//! Field validation for the create requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON parsing (billing-api)                                   │
//! │  ├── Well-formed JSON object                                           │
//! │  └── Unknown fields rejected                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field types (string / number), required fields                    │
//! │  ├── Formats, ranges                                                   │
//! │  └── Returns the validated value OR every field error                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Registries (billing-store)                                   │
//! │  ├── Unique keys (Conflict)                                            │
//! │  └── Currency reference exists (NotFound)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billing_core::validation::validate_create_currency;
//! use billing_core::CreateCurrencyRequest;
//! use serde_json::json;
//!
//! let request = CreateCurrencyRequest {
//!     currency: Some(json!("GBP")),
//!     monthly_fee_gbp: Some(json!(25)),
//! };
//! let currency = validate_create_currency(&request).unwrap();
//! assert_eq!(currency.code, "GBP");
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::{CreateAccountRequest, CreateCurrencyRequest, NewAccount, NewCurrency};
use crate::{CURRENCY_CODE_LEN, MAX_MONTHLY_FEE};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a `POST /currencies` body.
///
/// ## Rules
/// - `currency`: required string, exactly three uppercase ASCII letters
/// - `monthlyFeeGbp`: required number, > 0, ≤ 10000
pub fn validate_create_currency(
    request: &CreateCurrencyRequest,
) -> Result<NewCurrency, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let code = errors.capture(validate_currency_code(request.currency.as_ref()));
    let monthly_fee = errors.capture(validate_monthly_fee(request.monthly_fee_gbp.as_ref()));

    match (code, monthly_fee) {
        (Some(code), Some(monthly_fee)) if errors.is_empty() => {
            Ok(NewCurrency { code, monthly_fee })
        }
        _ => Err(errors),
    }
}

/// Validates a `POST /accounts` body.
///
/// ## Rules
/// - `accountId`: required string, letters/digits/hyphens/underscores only
/// - `currency`: required string, three uppercase letters (existence is checked by the registry)
/// - `transactionThreshold`: required number, > 0, may be fractional
/// - `discountDays`: required whole number, ≥ 0
/// - `discountRate`: required number, in [0, 1]
pub fn validate_create_account(
    request: &CreateAccountRequest,
) -> Result<NewAccount, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let id = errors.capture(validate_account_id(request.account_id.as_ref()));
    let currency_code = errors.capture(validate_currency_code(request.currency.as_ref()));
    let transaction_threshold = errors.capture(validate_transaction_threshold(
        request.transaction_threshold.as_ref(),
    ));
    let discount_days = errors.capture(validate_discount_days(request.discount_days.as_ref()));
    let discount_rate = errors.capture(validate_discount_rate(request.discount_rate.as_ref()));

    match (
        id,
        currency_code,
        transaction_threshold,
        discount_days,
        discount_rate,
    ) {
        (
            Some(id),
            Some(currency_code),
            Some(transaction_threshold),
            Some(discount_days),
            Some(discount_rate),
        ) if errors.is_empty() => Ok(NewAccount {
            id,
            currency_code,
            transaction_threshold,
            discount_days,
            discount_rate,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// Raw Field Readers
// =============================================================================

/// A JSON number read from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberValue {
    /// Held exactly as a decimal.
    Exact(Decimal),
    /// Too large in magnitude for a decimal; only the sign is kept.
    OutOfRange { negative: bool },
}

/// Reads a required string field.
///
/// `null` counts as missing, and so does an empty string.
///
/// ## Example
/// ```rust
/// use billing_core::validation::read_string;
/// use serde_json::json;
///
/// assert_eq!(read_string(Some(&json!("USD")), "currency", "Currency"), Ok("USD"));
///
/// let err = read_string(Some(&json!(840)), "currency", "Currency").unwrap_err();
/// assert_eq!(err.to_string(), "Currency must be a string");
/// ```
pub fn read_string<'a>(
    value: Option<&'a Value>,
    field: &'static str,
    label: &'static str,
) -> ValidationResult<&'a str> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Required { field, label }),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Required { field, label }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::NotAString { field, label }),
    }
}

/// Reads a required number field.
///
/// Integers and fractions are both accepted. A number beyond the decimal
/// range comes back as [`NumberValue::OutOfRange`] so each caller can apply
/// its own limit message.
///
/// ## Example
/// ```rust
/// use billing_core::validation::{read_number, NumberValue};
/// use rust_decimal_macros::dec;
/// use serde_json::json;
///
/// let value = json!(100.5);
/// assert_eq!(
///     read_number(Some(&value), "transactionThreshold", "Transaction threshold"),
///     Ok(NumberValue::Exact(dec!(100.5)))
/// );
///
/// let err = read_number(Some(&json!("100")), "transactionThreshold", "Transaction threshold")
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Transaction threshold must be a number");
/// ```
pub fn read_number(
    value: Option<&Value>,
    field: &'static str,
    label: &'static str,
) -> ValidationResult<NumberValue> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Required { field, label }),
        Some(Value::Number(number)) => Ok(match number_to_decimal(number) {
            Some(exact) => NumberValue::Exact(exact),
            None => NumberValue::OutOfRange {
                negative: number.as_f64().map_or(false, |f| f < 0.0),
            },
        }),
        Some(_) => Err(ValidationError::NotANumber { field, label }),
    }
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }
    // floats print as their shortest round-trip form, e.g. `100.5` or `1e30`
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a currency code.
///
/// ## Example
/// ```rust
/// use billing_core::validation::validate_currency_code;
/// use serde_json::json;
///
/// assert!(validate_currency_code(Some(&json!("USD"))).is_ok());
/// assert!(validate_currency_code(Some(&json!("usd"))).is_err());
/// assert!(validate_currency_code(Some(&json!("EURO"))).is_err());
/// assert!(validate_currency_code(None).is_err());
/// ```
pub fn validate_currency_code(code: Option<&Value>) -> ValidationResult<String> {
    const FIELD: &str = "currency";
    const LABEL: &str = "Currency";

    let code = read_string(code, FIELD, LABEL)?;

    if code.len() != CURRENCY_CODE_LEN || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: FIELD,
            label: LABEL,
            reason: "must be a 3-letter uppercase code (e.g., USD, EUR, GBP)",
        });
    }

    Ok(code.to_string())
}

/// Validates an account ID.
///
/// ## Example
/// ```rust
/// use billing_core::validation::validate_account_id;
/// use serde_json::json;
///
/// assert!(validate_account_id(Some(&json!("test-account_123"))).is_ok());
/// assert!(validate_account_id(Some(&json!("has space"))).is_err());
/// assert!(validate_account_id(Some(&json!(""))).is_err());
/// ```
pub fn validate_account_id(id: Option<&Value>) -> ValidationResult<String> {
    const FIELD: &str = "accountId";
    const LABEL: &str = "Account ID";

    let id = read_string(id, FIELD, LABEL)?;

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: FIELD,
            label: LABEL,
            reason: "can only contain letters, numbers, hyphens, and underscores",
        });
    }

    Ok(id.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monthly fee.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed 10000
pub fn validate_monthly_fee(fee: Option<&Value>) -> ValidationResult<Money> {
    const FIELD: &str = "monthlyFeeGbp";
    const LABEL: &str = "Monthly fee";

    let too_large = ValidationError::TooLarge {
        field: FIELD,
        label: LABEL,
        max: "£10,000",
    };
    let not_positive = ValidationError::MustBePositive {
        field: FIELD,
        label: LABEL,
    };

    match read_number(fee, FIELD, LABEL)? {
        NumberValue::Exact(fee) if fee <= Decimal::ZERO => Err(not_positive),
        NumberValue::Exact(fee) if fee > MAX_MONTHLY_FEE => Err(too_large),
        NumberValue::Exact(fee) => Ok(Money::from_decimal(fee)),
        NumberValue::OutOfRange { negative: true } => Err(not_positive),
        NumberValue::OutOfRange { negative: false } => Err(too_large),
    }
}

/// Validates a transaction threshold (must be > 0, fractions allowed).
pub fn validate_transaction_threshold(threshold: Option<&Value>) -> ValidationResult<Decimal> {
    const FIELD: &str = "transactionThreshold";
    const LABEL: &str = "Transaction threshold";

    match read_number(threshold, FIELD, LABEL)? {
        NumberValue::Exact(t) if t > Decimal::ZERO => Ok(t),
        NumberValue::Exact(_) | NumberValue::OutOfRange { negative: true } => {
            Err(ValidationError::MustBePositive {
                field: FIELD,
                label: LABEL,
            })
        }
        NumberValue::OutOfRange { negative: false } => Err(ValidationError::OutOfRange {
            field: FIELD,
            label: LABEL,
        }),
    }
}

/// Validates the length of the discount window in days (whole number, ≥ 0).
pub fn validate_discount_days(days: Option<&Value>) -> ValidationResult<i64> {
    const FIELD: &str = "discountDays";
    const LABEL: &str = "Discount days";

    let days = match read_number(days, FIELD, LABEL)? {
        NumberValue::Exact(d) => d,
        NumberValue::OutOfRange { negative: true } => {
            return Err(ValidationError::Negative {
                field: FIELD,
                label: LABEL,
            })
        }
        NumberValue::OutOfRange { negative: false } => {
            return Err(ValidationError::OutOfRange {
                field: FIELD,
                label: LABEL,
            })
        }
    };

    if !days.fract().is_zero() {
        return Err(ValidationError::InvalidFormat {
            field: FIELD,
            label: LABEL,
            reason: "must be a whole number",
        });
    }

    if days < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: FIELD,
            label: LABEL,
        });
    }

    days.to_i64().ok_or(ValidationError::OutOfRange {
        field: FIELD,
        label: LABEL,
    })
}

/// Validates a discount rate.
///
/// ## Rules
/// - Between 0 and 1 inclusive (0.15 = 15% off)
///
/// ## Example
/// ```rust
/// use billing_core::validation::validate_discount_rate;
/// use serde_json::json;
///
/// assert!(validate_discount_rate(Some(&json!(0))).is_ok());
/// assert!(validate_discount_rate(Some(&json!(1))).is_ok());
/// assert!(validate_discount_rate(Some(&json!(1.01))).is_err());
/// assert!(validate_discount_rate(Some(&json!(-0.1))).is_err());
/// ```
pub fn validate_discount_rate(rate: Option<&Value>) -> ValidationResult<Decimal> {
    const FIELD: &str = "discountRate";
    const LABEL: &str = "Discount rate";

    let negative = ValidationError::Negative {
        field: FIELD,
        label: LABEL,
    };
    let too_large = ValidationError::TooLarge {
        field: FIELD,
        label: LABEL,
        max: "100% (1.0)",
    };

    match read_number(rate, FIELD, LABEL)? {
        NumberValue::Exact(rate) if rate < Decimal::ZERO => Err(negative),
        NumberValue::Exact(rate) if rate > Decimal::ONE => Err(too_large),
        NumberValue::Exact(rate) => Ok(rate),
        NumberValue::OutOfRange { negative: true } => Err(negative),
        NumberValue::OutOfRange { negative: false } => Err(too_large),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
