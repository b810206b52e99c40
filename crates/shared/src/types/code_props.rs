//! Property-based tests for code normalization.

use proptest::prelude::*;

use super::code::{CodeKind, normalize_code};

fn kind_strategy() -> impl Strategy<Value = CodeKind> {
    prop_oneof![
        Just(CodeKind::Account),
        Just(CodeKind::FeeItem),
        Just(CodeKind::GradeLevel),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Normalizing twice equals normalizing once, and the result is canonical.
    #[test]
    fn prop_normalize_is_idempotent(raw in "[A-Za-z0-9_]{1,20}", kind in kind_strategy()) {
        let once = normalize_code(&raw, kind).unwrap();
        let twice = normalize_code(once.as_str(), kind).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once
            .as_str()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
    }

    /// Any character outside the class is rejected before case folding.
    #[test]
    fn prop_foreign_characters_rejected(
        prefix in "[a-z0-9_]{0,5}",
        bad in "[^A-Za-z0-9_]",
        kind in kind_strategy(),
    ) {
        let raw = format!("{prefix}{bad}");
        prop_assert!(normalize_code(&raw, kind).is_err());
    }
}
