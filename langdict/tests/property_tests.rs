use langdict::{ClassifyOptions, IdentityMode, LanguageGroup, Term, partition};
use proptest::prelude::*;
use std::collections::HashMap;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-d]{1,2}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ,]{0,8}").expect("valid value regex")
}

fn lang_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["en", "fr", "de"]).prop_map(str::to_string)
}

fn terms_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..24)
}

fn build_group(pairs: &[(String, String)]) -> LanguageGroup {
    LanguageGroup::with_terms(
        "en",
        pairs
            .iter()
            .enumerate()
            .map(|(row, (key, value))| Term::new(key.clone(), value.clone(), row))
            .collect(),
    )
}

proptest! {
    #[test]
    fn prop_equality_is_key_and_value_only(
        key in key_strategy(),
        value in value_strategy(),
        other_value in value_strategy(),
        row_a in 0usize..1000,
        row_b in 0usize..1000,
    ) {
        let a = Term::new(key.clone(), value.clone(), row_a);
        let b = Term::new(key.clone(), value.clone(), row_b);
        prop_assert_eq!(&a, &b);

        let c = Term::new(key, other_value.clone(), row_a);
        prop_assert_eq!(a == c, value == other_value);
    }

    #[test]
    fn prop_duplicates_are_exactly_shared_keys(pairs in terms_strategy()) {
        let group = build_group(&pairs);
        let duplicates = group.find_duplicates();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (key, _) in &pairs {
            *counts.entry(key.as_str()).or_default() += 1;
        }
        let expected = pairs.iter().filter(|(key, _)| counts[key.as_str()] > 1).count();
        prop_assert_eq!(duplicates.len(), expected);

        // Sorted by key, input order within a key.
        for window in duplicates.windows(2) {
            let (a, b) = (window[0], window[1]);
            prop_assert!(
                a.key() < b.key() || (a.key() == b.key() && a.source_row() < b.source_row())
            );
        }
    }

    #[test]
    fn prop_find_duplicates_is_idempotent(pairs in terms_strategy()) {
        let group = build_group(&pairs);
        let first: Vec<usize> = group.find_duplicates().iter().map(|t| t.source_row()).collect();
        let second: Vec<usize> = group.find_duplicates().iter().map(|t| t.source_row()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_distinct_terms_shrink_with_coarser_modes(pairs in terms_strategy()) {
        let mut group = build_group(&pairs);
        group.set_identity_mode(IdentityMode::Full);
        let full = group.distinct_terms().len();
        group.set_identity_mode(IdentityMode::KeyAndValue);
        let key_value = group.distinct_terms().len();
        group.set_identity_mode(IdentityMode::KeyOnly);
        let key_only = group.distinct_terms().len();

        prop_assert_eq!(full, pairs.len());
        prop_assert!(key_value <= full);
        prop_assert!(key_only <= key_value);
    }

    #[test]
    fn prop_duplicate_rows_sorted_by_source_row(
        rows in prop::collection::vec((lang_strategy(), key_strategy(), value_strategy()), 0..32)
    ) {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|(lang, key, value)| vec![lang, key, value])
            .collect();
        let result = partition(&rows, &ClassifyOptions::new().with_language_check(false)).unwrap();

        let source_rows: Vec<usize> = result.duplicates.iter().map(|d| d.source_row).collect();
        let mut sorted = source_rows.clone();
        sorted.sort_unstable();
        prop_assert_eq!(source_rows, sorted);
        prop_assert_eq!(result.term_count(), rows.len());
    }
}
