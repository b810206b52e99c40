//! Reusable field constraints.
//!
//! Each validator takes one JSON value (or its absence) and returns either the
//! normalized value or the message to attach to the field. Contracts combine
//! them with [`ValidationErrors::check`](super::ValidationErrors::check).

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use sras_shared::types::money::parse_money_to_cents;
use sras_shared::types::{CanonicalCode, Cents, CodeKind, RecordId, normalize_code};
use uuid::Uuid;

/// Message for a field that is missing or null.
pub const REQUIRED: &str = "Required";

const EXPECTED_STRING: &str = "Expected a string";
const EXPECTED_BOOLEAN: &str = "Expected a boolean";
const INVALID_DATE: &str = "Invalid date format";
const INVALID_TIMESTAMP: &str = "Invalid timestamp";
const DATE_ONLY_FORMAT: &str = "Date must be in YYYY-MM-DD format";
const POSITIVE_ID: &str = "ID must be a positive integer";

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Rejects a missing or null value.
pub fn required(value: Option<&Value>) -> Result<&Value, String> {
    match value {
        None | Some(Value::Null) => Err(REQUIRED.to_string()),
        Some(value) => Ok(value),
    }
}

/// A string that must be present and non-empty.
pub fn required_text(value: Option<&Value>, message: &str) -> Result<String, String> {
    match value {
        None | Some(Value::Null) => Err(message.to_string()),
        Some(Value::String(s)) if s.is_empty() => Err(message.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(EXPECTED_STRING.to_string()),
    }
}

/// A string that may be absent; an empty string counts as absent.
pub fn optional_text(value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(EXPECTED_STRING.to_string()),
    }
}

/// Non-empty string validator.
pub fn non_empty_string(value: &Value) -> Result<String, String> {
    required_text(Some(value), "String cannot be empty")
}

/// A boolean flag with a default for when it is absent.
pub fn boolean_or(value: Option<&Value>, default: bool) -> Result<bool, String> {
    match value {
        None => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(EXPECTED_BOOLEAN.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// An identifier: a UUID string, any other non-empty string, or a positive integer.
///
/// The UUID shape is tried first so that UUID keys keep their typed form.
pub fn id(value: &Value) -> Result<RecordId, String> {
    match value {
        Value::String(s) if s.is_empty() => Err("ID cannot be empty".to_string()),
        Value::String(s) => Ok(parse_uuid(s).map_or_else(|| RecordId::Text(s.clone()), RecordId::Uuid)),
        Value::Number(n) => positive_integer_of(n).map(RecordId::Numeric).ok_or_else(|| POSITIVE_ID.to_string()),
        _ => Err("Invalid ID".to_string()),
    }
}

/// An identifier referencing another record; missing, null and empty all
/// report `message`.
pub fn reference(value: Option<&Value>, message: &str) -> Result<RecordId, String> {
    match value {
        None | Some(Value::Null) => Err(message.to_string()),
        Some(Value::String(s)) if s.is_empty() => Err(message.to_string()),
        Some(value) => id(value),
    }
}

/// An optional reference; absent, null and empty are all `None`.
pub fn optional_reference(value: Option<&Value>) -> Result<Option<RecordId>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => id(value).map(Some),
    }
}

/// Strict hyphenated UUID.
pub fn uuid(value: &Value) -> Result<Uuid, String> {
    value
        .as_str()
        .and_then(parse_uuid)
        .ok_or_else(|| "Invalid UUID format".to_string())
}

/// Positive integer identifier.
pub fn numeric_id(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => positive_integer_of(n).ok_or_else(|| POSITIVE_ID.to_string()),
        _ => Err(POSITIVE_ID.to_string()),
    }
}

fn parse_uuid(s: &str) -> Option<Uuid> {
    if s.len() != 36 {
        return None;
    }
    Uuid::try_parse(s).ok()
}

fn positive_integer_of(n: &Number) -> Option<u64> {
    n.as_u64().filter(|v| *v > 0)
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// The admissible shapes of a date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// An already-typed instant.
    Native(DateTime<Utc>),
    /// An RFC 3339 datetime or a `YYYY-MM-DD` date.
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
}

/// Normalizes any admissible date shape to a UTC instant.
///
/// Text is read as an RFC 3339 datetime first, then as a `YYYY-MM-DD` date at
/// UTC midnight. A string of digits is never read as a timestamp.
pub fn parse_date(input: DateInput<'_>) -> Result<DateTime<Utc>, String> {
    match input {
        DateInput::Native(date) => Ok(date),
        DateInput::Text(text) => parse_date_text(text),
        DateInput::Timestamp(millis) if millis > 0 => {
            DateTime::from_timestamp_millis(millis).ok_or_else(|| INVALID_TIMESTAMP.to_string())
        }
        DateInput::Timestamp(_) => Err(INVALID_TIMESTAMP.to_string()),
    }
}

/// Date validator over a JSON value.
pub fn date(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::String(text) => parse_date(DateInput::Text(text)),
        Value::Number(n) => match n.as_i64() {
            Some(millis) => parse_date(DateInput::Timestamp(millis)),
            None => Err(INVALID_TIMESTAMP.to_string()),
        },
        _ => Err(INVALID_DATE.to_string()),
    }
}

/// A `YYYY-MM-DD` calendar date.
pub fn date_string(value: &Value) -> Result<NaiveDate, String> {
    value
        .as_str()
        .and_then(parse_date_only)
        .ok_or_else(|| DATE_ONLY_FORMAT.to_string())
}

fn parse_date_text(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.with_timezone(&Utc));
    }
    parse_date_only(text)
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| INVALID_DATE.to_string())
}

fn parse_date_only(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Money and numbers
// ---------------------------------------------------------------------------

/// A peso amount (text or number) converted to cents.
pub fn money(value: &Value) -> Result<Cents, String> {
    let cents = match value {
        Value::String(text) => parse_money_to_cents(text.as_str()),
        Value::Number(n) => {
            let pesos = decimal_of(n).ok_or_else(|| "Invalid money value".to_string())?;
            parse_money_to_cents(pesos)
        }
        _ => return Err("Invalid money value".to_string()),
    };
    cents.map_err(|e| e.to_string())
}

/// An amount already expressed in whole cents.
pub fn cents(value: &Value) -> Result<Cents, String> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Cents::new)
            .ok_or_else(|| "Cents must be a safe integer".to_string()),
        _ => Err("Cents must be a safe integer".to_string()),
    }
}

/// Any whole number.
pub fn integer(value: &Value, message: &str) -> Result<i64, String> {
    value.as_i64().ok_or_else(|| message.to_string())
}

/// A whole number greater than zero.
pub fn positive_integer(value: &Value, message: &str) -> Result<u64, String> {
    value
        .as_u64()
        .filter(|v| *v > 0)
        .ok_or_else(|| message.to_string())
}

/// Positive number validator.
pub fn positive_number(value: &Value) -> Result<Decimal, String> {
    number(value)
        .filter(|n| n.is_sign_positive() && !n.is_zero())
        .ok_or_else(|| "Number must be positive".to_string())
}

/// Non-negative number validator (includes zero).
pub fn non_negative_number(value: &Value) -> Result<Decimal, String> {
    number(value)
        .filter(|n| n.is_zero() || n.is_sign_positive())
        .ok_or_else(|| "Number must be non-negative".to_string())
}

fn number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => decimal_of(n),
        _ => None,
    }
}

/// Reads a JSON number exactly, without going through float arithmetic.
fn decimal_of(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

// ---------------------------------------------------------------------------
// Codes and contact details
// ---------------------------------------------------------------------------

/// A business code, validated for its kind and upper-cased.
pub fn code(value: &Value, kind: CodeKind) -> Result<CanonicalCode, String> {
    let raw = value.as_str().ok_or_else(|| EXPECTED_STRING.to_string())?;
    normalize_code(raw, kind).map_err(|e| e.to_string())
}

/// Philippine mobile number: `(+63|0)?9` followed by nine digits.
pub fn phone(value: &Value) -> Result<String, String> {
    match value.as_str() {
        Some(s) if is_ph_mobile(s) => Ok(s.to_string()),
        _ => Err("Invalid Philippine phone number format".to_string()),
    }
}

fn is_ph_mobile(s: &str) -> bool {
    let subscriber = s
        .strip_prefix("+63")
        .or_else(|| s.strip_prefix('0'))
        .unwrap_or(s);
    subscriber.len() == 10
        && subscriber.starts_with('9')
        && subscriber.bytes().all(|b| b.is_ascii_digit())
}

/// Email address with a local part and a dotted domain.
pub fn email(value: &Value) -> Result<String, String> {
    match value.as_str() {
        Some(s) if is_email(s) => Ok(s.to_string()),
        _ => Err("Invalid email format".to_string()),
    }
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

// ---------------------------------------------------------------------------
// Listing parameters
// ---------------------------------------------------------------------------

/// Direction of a sorted listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Sort order validator; absent means ascending.
pub fn sort_order(value: Option<&Value>) -> Result<SortOrder, String> {
    match value {
        None => Ok(SortOrder::Asc),
        Some(Value::String(s)) if s == "asc" => Ok(SortOrder::Asc),
        Some(Value::String(s)) if s == "desc" => Ok(SortOrder::Desc),
        Some(_) => Err("Invalid enum value. Expected 'asc' | 'desc'".to_string()),
    }
}

/// Accepts the stored name of one of `variants`.
pub fn one_of<T: Copy>(
    value: &Value,
    variants: &[T],
    name: fn(T) -> &'static str,
) -> Result<T, String> {
    value
        .as_str()
        .and_then(|raw| variants.iter().copied().find(|v| name(*v) == raw))
        .ok_or_else(|| {
            let names: Vec<String> = variants.iter().map(|v| format!("'{}'", name(*v))).collect();
            format!("Invalid enum value. Expected {}", names.join(" | "))
        })
}
