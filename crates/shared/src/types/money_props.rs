//! Property-based tests for cents parsing, formatting and checked arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::money::{
    Cents, MoneyError, add_cents, format_cents_to_currency, parse_money_to_cents, subtract_cents,
};

/// Strategy for peso amounts with at most two fractional digits.
fn peso_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000_000i64..100_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for any decimal with up to six fractional digits.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64, 0u32..=6)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Renders a non-negative whole number with comma thousands separators.
fn with_separators(whole: u64) -> String {
    let digits = whole.to_string();
    let mut out = String::new();
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Numeric input is scaled by 100 and rounded half away from zero.
    #[test]
    fn prop_number_is_rounded_hundredfold(amount in any_amount()) {
        let expected = (amount * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        let cents = parse_money_to_cents(amount).unwrap();
        prop_assert_eq!(Decimal::from(cents.value()), expected);
    }

    /// Decorated text parses to the same cents as the bare number.
    #[test]
    fn prop_text_matches_number(whole in 0u64..10_000_000_000, fraction in 0u32..100, symbol in prop::sample::select(vec!["", "₱", "$", "€", "£", "¥"])) {
        let text = format!("{symbol} {}.{fraction:02}", with_separators(whole));
        let number = Decimal::new(i64::try_from(whole).unwrap(), 0) + Decimal::new(i64::from(fraction), 2);
        prop_assert_eq!(parse_money_to_cents(text.as_str()), parse_money_to_cents(number));
    }

    /// Formatting then re-parsing yields the original cents.
    #[test]
    fn prop_format_round_trips(amount in peso_amount()) {
        let cents = parse_money_to_cents(amount).unwrap();
        let rendered = format_cents_to_currency(cents);
        prop_assert_eq!(parse_money_to_cents(rendered.as_str()), Ok(cents));
    }

    /// Subtraction undoes addition whenever the sum is representable.
    #[test]
    fn prop_add_then_subtract(a in any::<i64>(), b in any::<i64>()) {
        let (a, b) = (Cents::new(a), Cents::new(b));
        match a.value().checked_add(b.value()) {
            Some(_) => {
                let sum = add_cents(a, b).unwrap();
                prop_assert_eq!(subtract_cents(sum, b), Ok(a));
            }
            None => {
                prop_assert_eq!(
                    add_cents(a, b),
                    Err(MoneyError::UnsafeArithmeticResult { operation: "Addition" })
                );
            }
        }
    }
}
