//! Money as integer cents.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Human-entered amounts are parsed into `rust_decimal::Decimal` and rounded to
//! whole cents exactly once, at the input boundary. Everything downstream works
//! with [`Cents`], whose arithmetic is checked and fails instead of wrapping.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency symbol used when rendering amounts.
pub const PESO_SIGN: char = '₱';

/// Symbols removed from textual amounts before parsing.
const CURRENCY_SYMBOLS: [char; 5] = ['₱', '$', '€', '£', '¥'];

/// Errors raised while normalizing or computing money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The input is not a number once symbols and separators are removed.
    #[error("Invalid money value: {0}")]
    InvalidMoneyFormat(String),

    /// A cents value carries a fractional part.
    #[error("Cents must be an integer, got: {0}")]
    NonIntegerCents(Decimal),

    /// The result does not fit in the cents range.
    #[error("{operation} result exceeds safe integer range")]
    UnsafeArithmeticResult {
        /// The operation that overflowed ("Addition", "Subtraction", ...).
        operation: &'static str,
    },
}

impl MoneyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMoneyFormat(_) => "INVALID_MONEY_FORMAT",
            Self::NonIntegerCents(_) => "NON_INTEGER_CENTS",
            Self::UnsafeArithmeticResult { .. } => "UNSAFE_ARITHMETIC_RESULT",
        }
    }

    const fn overflow(operation: &'static str) -> Self {
        Self::UnsafeArithmeticResult { operation }
    }
}

/// An amount of money in the smallest currency unit (centavos).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);
    /// Largest representable amount.
    pub const MAX: Self = Self(i64::MAX);
    /// Smallest representable amount.
    pub const MIN: Self = Self(i64::MIN);

    /// Wraps a raw cents count.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw cents count.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<Cents> for i64 {
    fn from(cents: Cents) -> Self {
        cents.0
    }
}

impl TryFrom<Decimal> for Cents {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value != value.trunc() {
            return Err(MoneyError::NonIntegerCents(value));
        }
        value
            .to_i64()
            .map(Self)
            .ok_or(MoneyError::overflow("Conversion"))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A human-entered amount, in pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyInput<'a> {
    /// Free text such as `"₱1,000.50"`.
    Text(&'a str),
    /// A numeric amount such as `1000.50`.
    Number(Decimal),
}

impl<'a> From<&'a str> for MoneyInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for MoneyInput<'_> {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MoneyInput<'_> {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

/// Parses a peso amount into integer cents.
///
/// Text input has currency symbols (₱ $ € £ ¥), thousands separators and
/// whitespace removed before it is read as a decimal number; scientific
/// notation is accepted. Any other character, including `_`, is rejected. Amounts with more than two fractional digits are
/// rounded half away from zero. Negative amounts are allowed.
///
/// # Examples
///
/// ```
/// use sras_shared::types::money::{parse_money_to_cents, Cents};
///
/// assert_eq!(parse_money_to_cents("₱1,000.50"), Ok(Cents::new(100_050)));
/// ```
pub fn parse_money_to_cents<'a>(value: impl Into<MoneyInput<'a>>) -> Result<Cents, MoneyError> {
    match value.into() {
        MoneyInput::Number(pesos) => pesos_to_cents(pesos),
        MoneyInput::Text(raw) => pesos_to_cents(parse_pesos_text(raw)?),
    }
}

fn parse_pesos_text(raw: &str) -> Result<Decimal, MoneyError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !(CURRENCY_SYMBOLS.contains(c) || *c == ',' || c.is_whitespace()))
        .collect();

    let numeric = |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E');
    if cleaned.is_empty() || !cleaned.chars().all(numeric) {
        return Err(MoneyError::InvalidMoneyFormat(raw.to_string()));
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| MoneyError::InvalidMoneyFormat(raw.to_string()))
}

/// Converts pesos to cents, rounding half away from zero.
pub fn pesos_to_cents(pesos: Decimal) -> Result<Cents, MoneyError> {
    let scaled = pesos
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(MoneyError::overflow("Conversion"))?;
    round_to_cents(scaled, "Conversion")
}

/// Converts cents back to pesos.
#[must_use]
pub fn cents_to_pesos(cents: Cents) -> Decimal {
    Decimal::new(cents.0, 2)
}

/// Returns true if `value` is a whole number inside the cents range.
#[must_use]
pub fn is_safe_integer_cents(value: Decimal) -> bool {
    Cents::try_from(value).is_ok()
}

/// Formats cents as pesos with the peso sign, e.g. `100050` -> `"₱1,000.50"`.
#[must_use]
pub fn format_cents_to_currency(cents: Cents) -> String {
    let sign = if cents.is_negative() { "-" } else { "" };
    format!("{sign}{PESO_SIGN}{}", group_pesos(cents))
}

/// Formats cents as pesos without a currency sign, e.g. `100050` -> `"1,000.50"`.
#[must_use]
pub fn format_cents_to_php_string(cents: Cents) -> String {
    let sign = if cents.is_negative() { "-" } else { "" };
    format!("{sign}{}", group_pesos(cents))
}

fn group_pesos(cents: Cents) -> String {
    let magnitude = cents.0.unsigned_abs();
    let whole = (magnitude / 100).to_string();
    let fraction = magnitude % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{fraction:02}")
}

/// Adds two amounts.
///
/// # Errors
///
/// Returns `UnsafeArithmeticResult` if the sum overflows.
pub fn add_cents(a: Cents, b: Cents) -> Result<Cents, MoneyError> {
    a.0.checked_add(b.0)
        .map(Cents)
        .ok_or(MoneyError::overflow("Addition"))
}

/// Subtracts `b` from `a`.
///
/// # Errors
///
/// Returns `UnsafeArithmeticResult` if the difference overflows.
pub fn subtract_cents(a: Cents, b: Cents) -> Result<Cents, MoneyError> {
    a.0.checked_sub(b.0)
        .map(Cents)
        .ok_or(MoneyError::overflow("Subtraction"))
}

/// Scales an amount by a decimal multiplier, rounding half away from zero.
///
/// # Errors
///
/// Returns `UnsafeArithmeticResult` if the product overflows.
pub fn multiply_cents(cents: Cents, multiplier: Decimal) -> Result<Cents, MoneyError> {
    let product = Decimal::from(cents.0)
        .checked_mul(multiplier)
        .ok_or(MoneyError::overflow("Multiplication"))?;
    round_to_cents(product, "Multiplication")
}

fn round_to_cents(value: Decimal, operation: &'static str) -> Result<Cents, MoneyError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(Cents)
        .ok_or(MoneyError::overflow(operation))
}
