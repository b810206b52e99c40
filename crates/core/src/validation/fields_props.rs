//! Property-based tests for the date, money and phone validators.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use serde_json::json;
use sras_shared::types::Cents;

use super::fields::{date, money, phone};

proptest! {
    /// A `YYYY-MM-DD` string always lands on UTC midnight of that day.
    #[test]
    fn prop_date_only_is_utc_midnight(offset in 0i64..73_000) {
        let day = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(offset);
        let parsed = date(&json!(day.format("%Y-%m-%d").to_string())).unwrap();
        prop_assert_eq!(parsed, day.and_time(NaiveTime::MIN).and_utc());
    }

    /// Strings of digits are never read as timestamps.
    #[test]
    fn prop_numeric_strings_are_not_dates(digits in "[0-9]{1,15}") {
        prop_assert!(date(&json!(digits)).is_err());
    }

    /// Positive integer timestamps are milliseconds since the epoch.
    #[test]
    fn prop_timestamps_are_milliseconds(millis in 1i64..4_102_444_800_000) {
        let parsed = date(&json!(millis)).unwrap();
        prop_assert_eq!(parsed.timestamp_millis(), millis);
    }

    /// Whole-peso numbers and their text form agree.
    #[test]
    fn prop_money_number_and_text_agree(pesos in -1_000_000_000i64..1_000_000_000) {
        let from_number = money(&json!(pesos)).unwrap();
        let from_text = money(&json!(pesos.to_string())).unwrap();
        prop_assert_eq!(from_number, from_text);
        prop_assert_eq!(from_number, Cents::new(pesos * 100));
    }

    /// Every accepted prefix followed by `9` and nine digits is a valid mobile number.
    #[test]
    fn prop_mobile_numbers(prefix in prop::sample::select(vec!["", "0", "+63"]), rest in "[0-9]{9}") {
        let number = format!("{prefix}9{rest}");
        prop_assert_eq!(phone(&json!(number.clone())), Ok(number));
    }
}
