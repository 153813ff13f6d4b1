//! Partitions translation rows into language groups and flags problems.
//!
//! ```rust
//! use langdict::{AllowedLanguages, ClassifyOptions, partition};
//!
//! let rows = vec![
//!     vec!["en", "greeting", "hello"],
//!     vec!["en", "greeting", "hi"],
//!     vec!["fr", "greeting", "bonjour"],
//! ];
//! let options = ClassifyOptions::new()
//!     .with_allowed_codes(["en", "fr"].into_iter().collect::<AllowedLanguages>());
//!
//! let classification = partition(&rows, &options)?;
//! assert!(classification.invalid_languages.is_empty());
//! assert_eq!(classification.duplicates.len(), 2);
//! assert_eq!(classification.groups.len(), 2);
//! # Ok::<(), langdict::Error>(())
//! ```

use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    error::Error,
    group::LanguageGroup,
    languages::AllowedLanguages,
    report::{DuplicateRow, InvalidLanguageRow, display_row_number},
    term::{IdentityMode, Term},
};

/// Options for one classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Whether the source had a header row (already stripped). Only affects
    /// reported row numbers.
    pub header_present: bool,
    /// Whether codes are checked against `allowed_codes`.
    pub check_language_codes: bool,
    pub allowed_codes: AllowedLanguages,
    /// Mode applied to every group before duplicate detection.
    pub identity_mode: IdentityMode,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            header_present: false,
            check_language_codes: true,
            allowed_codes: AllowedLanguages::default(),
            identity_mode: IdentityMode::default(),
        }
    }
}

impl ClassifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header_present: bool) -> Self {
        self.header_present = header_present;
        self
    }

    pub fn with_language_check(mut self, check_language_codes: bool) -> Self {
        self.check_language_codes = check_language_codes;
        self
    }

    pub fn with_allowed_codes(mut self, allowed_codes: AllowedLanguages) -> Self {
        self.allowed_codes = allowed_codes;
        self
    }

    pub fn with_identity_mode(mut self, identity_mode: IdentityMode) -> Self {
        self.identity_mode = identity_mode;
        self
    }
}

/// A validated `(language code, key, value)` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub language_code: String,
    pub key: String,
    pub value: String,
}

impl SourceRow {
    /// Builds a row from exactly three fields, failing with
    /// [`Error::MalformedRow`] for any other shape.
    pub fn from_fields<S: AsRef<str>>(index: usize, fields: &[S]) -> Result<Self, Error> {
        match fields {
            [language_code, key, value] => Ok(SourceRow {
                language_code: language_code.as_ref().to_string(),
                key: key.as_ref().to_string(),
                value: value.as_ref().to_string(),
            }),
            _ => Err(Error::malformed_row(index, fields.len())),
        }
    }
}

/// Result of a classification pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// One group per language code, in first-seen order.
    pub groups: Vec<LanguageGroup>,
    /// Rows with a disallowed language code, in input order.
    pub invalid_languages: Vec<InvalidLanguageRow>,
    /// Duplicate terms across all groups, sorted by source row.
    pub duplicates: Vec<DuplicateRow>,
}

impl Classification {
    pub fn group(&self, language_code: &str) -> Option<&LanguageGroup> {
        self.groups
            .iter()
            .find(|group| group.language_code() == language_code)
    }

    pub fn term_count(&self) -> usize {
        self.groups.iter().map(LanguageGroup::len).sum()
    }

    pub fn has_issues(&self) -> bool {
        !self.invalid_languages.is_empty() || !self.duplicates.is_empty()
    }
}

/// Groups rows by language code and runs the checks configured in its options.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    options: ClassifyOptions,
}

impl Classifier {
    pub fn new(options: ClassifyOptions) -> Self {
        Classifier { options }
    }

    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Classifies `rows`, given in file order with any header already removed.
    ///
    /// Invalid language codes are recorded and processing continues; a row
    /// that is not exactly three fields aborts the pass.
    pub fn partition<I, R, S>(&self, rows: I) -> Result<Classification, Error>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let options = &self.options;
        let mut groups: Vec<LanguageGroup> = Vec::new();
        let mut index_by_code: HashMap<String, usize> = HashMap::new();
        let mut invalid_languages = Vec::new();

        for (index, fields) in rows.into_iter().enumerate() {
            let row = SourceRow::from_fields(index, fields.as_ref())?;

            let slot = match index_by_code.get(&row.language_code) {
                Some(&slot) => slot,
                None => {
                    tracing::debug!(language = %row.language_code, "new language group");
                    let mut group = LanguageGroup::new(row.language_code.clone());
                    group.set_identity_mode(options.identity_mode);
                    groups.push(group);
                    index_by_code.insert(row.language_code.clone(), groups.len() - 1);
                    groups.len() - 1
                }
            };

            if options.check_language_codes && !options.allowed_codes.contains(&row.language_code)
            {
                let display_row = display_row_number(index, options.header_present);
                tracing::debug!(
                    row = display_row,
                    language = %row.language_code,
                    "invalid language code"
                );
                invalid_languages.push(InvalidLanguageRow {
                    display_row,
                    language_code: row.language_code.clone(),
                    key: row.key.clone(),
                    value: row.value.clone(),
                });
            }

            groups[slot].add_term(Term::new(row.key, row.value, index));
        }

        let duplicates = collect_duplicates(&groups);
        tracing::debug!(
            groups = groups.len(),
            invalid = invalid_languages.len(),
            duplicates = duplicates.len(),
            "classification finished"
        );

        Ok(Classification {
            groups,
            invalid_languages,
            duplicates,
        })
    }
}

/// Runs duplicate detection per group and merges the results by source row.
fn collect_duplicates(groups: &[LanguageGroup]) -> Vec<DuplicateRow> {
    let mut duplicates: Vec<DuplicateRow> = groups
        .par_iter()
        .flat_map_iter(|group| {
            group
                .find_duplicates()
                .into_iter()
                .map(move |term| DuplicateRow::from_term(group.language_code(), term))
        })
        .collect();
    duplicates.sort_by_key(|row| row.source_row);
    duplicates
}

/// Shorthand for `Classifier::new(options.clone()).partition(rows)`.
pub fn partition<I, R, S>(rows: I, options: &ClassifyOptions) -> Result<Classification, Error>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    Classifier::new(options.clone()).partition(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(codes: &[&str]) -> AllowedLanguages {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_source_row_from_fields() {
        let row = SourceRow::from_fields(0, &["en", "k", "v"]).unwrap();
        assert_eq!(row.language_code, "en");
        assert_eq!(row.key, "k");
        assert_eq!(row.value, "v");
    }

    #[test]
    fn test_source_row_rejects_wrong_shape() {
        let err = SourceRow::from_fields(5, &["en", "k"]).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { index: 5, fields: 2 }));
        let err = SourceRow::from_fields(0, &["en", "k", "v", "extra"]).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { index: 0, fields: 4 }));
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let rows = vec![
            vec!["fr", "a", "1"],
            vec!["en", "a", "2"],
            vec!["fr", "b", "3"],
        ];
        let result = partition(&rows, &ClassifyOptions::new().with_language_check(false)).unwrap();
        let codes: Vec<_> = result.groups.iter().map(|g| g.language_code()).collect();
        assert_eq!(codes, vec!["fr", "en"]);
        assert_eq!(result.group("fr").unwrap().len(), 2);
        assert_eq!(result.term_count(), 3);
    }

    #[test]
    fn test_display_row_number_with_and_without_header() {
        let rows = vec![vec!["xx", "k", "v"]];
        let with_header = ClassifyOptions::new()
            .with_header(true)
            .with_allowed_codes(allowed(&["en"]));
        let result = partition(&rows, &with_header).unwrap();
        assert_eq!(result.invalid_languages[0].display_row, 3);

        let without_header = with_header.with_header(false);
        let result = partition(&rows, &without_header).unwrap();
        assert_eq!(result.invalid_languages[0].display_row, 2);
    }

    #[test]
    fn test_language_check_disabled() {
        let rows = vec![vec!["xx", "k", "v"]];
        let options = ClassifyOptions::new()
            .with_language_check(false)
            .with_allowed_codes(allowed(&["en"]));
        let result = partition(&rows, &options).unwrap();
        assert!(result.invalid_languages.is_empty());
    }

    #[test]
    fn test_invalid_rows_still_grouped_and_checked_for_duplicates() {
        let rows = vec![vec!["xx", "k", "a"], vec!["xx", "k", "b"]];
        let options = ClassifyOptions::new().with_allowed_codes(allowed(&["en"]));
        let result = partition(&rows, &options).unwrap();
        assert_eq!(result.invalid_languages.len(), 2);
        assert_eq!(result.group("xx").unwrap().len(), 2);
        assert_eq!(result.duplicates.len(), 2);
    }

    #[test]
    fn test_duplicates_sorted_by_source_row_across_groups() {
        let rows = vec![
            vec!["fr", "z", "1"],
            vec!["en", "a", "2"],
            vec!["fr", "z", "3"],
            vec!["en", "a", "4"],
        ];
        let result = partition(&rows, &ClassifyOptions::new().with_language_check(false)).unwrap();
        let source_rows: Vec<_> = result.duplicates.iter().map(|d| d.source_row).collect();
        assert_eq!(source_rows, vec![0, 1, 2, 3]);
        assert_eq!(result.duplicates[1].language_code, "en");
    }

    #[test]
    fn test_malformed_row_aborts() {
        let rows: Vec<Vec<&str>> = vec![vec!["en", "k", "v"], vec!["en", "k"]];
        let err = partition(&rows, &ClassifyOptions::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { index: 1, fields: 2 }));
    }

    #[test]
    fn test_identity_mode_applied_to_groups() {
        let rows = vec![vec!["en", "k", "v"]];
        let options = ClassifyOptions::new()
            .with_language_check(false)
            .with_identity_mode(IdentityMode::KeyAndValue);
        let result = Classifier::new(options).partition(&rows).unwrap();
        let group = result.group("en").unwrap();
        assert_eq!(group.identity_mode(), IdentityMode::KeyAndValue);
        assert_eq!(group.terms()[0].identity_mode(), IdentityMode::KeyAndValue);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<Vec<String>> = Vec::new();
        let result = partition(&rows, &ClassifyOptions::new()).unwrap();
        assert!(result.groups.is_empty());
        assert!(!result.has_issues());
    }
}
