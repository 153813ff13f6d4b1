//! The set of language codes accepted by the documentation platform.
//!
//! Codes come from a two-column CSV of `description,code` rows, conventionally
//! `allowedLanguageCodes.csv`. That file is Latin-1 encoded.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use unic_langid::LanguageIdentifier;

use crate::{error::Error, traits::Parser};

/// Allowed language codes, each with an optional region description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedLanguages {
    codes: BTreeMap<String, String>,
}

impl AllowedLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a code; a later description for the same code replaces the earlier one.
    pub fn insert(&mut self, code: impl Into<String>, description: impl Into<String>) {
        self.codes.insert(code.into(), description.into());
    }

    /// Exact, case-sensitive lookup.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    pub fn description(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes that are not well-formed BCP 47 language identifiers.
    ///
    /// Header rows read as data usually show up here.
    pub fn malformed_codes(&self) -> Vec<&str> {
        self.codes()
            .filter(|code| code.parse::<LanguageIdentifier>().is_err())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowedLanguages {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut allowed = AllowedLanguages::new();
        for code in iter {
            allowed.insert(code, String::new());
        }
        allowed
    }
}

impl Parser for AllowedLanguages {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut allowed = AllowedLanguages::new();
        for (index, record) in rdr.records().enumerate() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(description), Some(code)) => allowed.insert(code, description),
                _ => {
                    return Err(Error::InvalidAllowedCodes(format!(
                        "line {} has no language code column",
                        index + 1
                    )));
                }
            }
        }
        tracing::debug!(count = allowed.len(), "loaded allowed language codes");
        Ok(allowed)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for (code, description) in &self.codes {
            wtr.write_record([description.as_str(), code.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Reads the file as Latin-1 (Windows-1252) unless it starts with a BOM.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::WINDOWS_1252))
            .bom_override(true)
            .strip_bom(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_allowed_codes() {
        let csv = "English,en\nFrench,fr\n\"Chinese (Simplified)\",zh\n";
        let allowed = AllowedLanguages::from_str(csv).unwrap();
        assert_eq!(allowed.len(), 3);
        assert!(allowed.contains("en"));
        assert!(allowed.contains("zh"));
        assert!(!allowed.contains("EN"));
        assert_eq!(allowed.description("zh"), Some("Chinese (Simplified)"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let allowed = AllowedLanguages::from_str("German,de,extra\n").unwrap();
        assert!(allowed.contains("de"));
    }

    #[test]
    fn test_missing_code_column_fails() {
        let result = AllowedLanguages::from_str("English,en\nBroken\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_latin1_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("allowedLanguageCodes.csv");
        // "Français" in Latin-1
        fs::write(&path, b"Fran\xe7ais,fr\nEnglish,en\n").unwrap();

        let allowed = AllowedLanguages::read_from(&path).unwrap();
        assert_eq!(allowed.description("fr"), Some("Français"));
        assert!(allowed.contains("en"));
    }

    #[test]
    fn test_malformed_codes() {
        let allowed =
            AllowedLanguages::from_str("Language,Language code\nEnglish,en\nChinese (Taiwan),zh-TW\n")
                .unwrap();
        assert_eq!(allowed.malformed_codes(), vec!["Language code"]);
    }

    #[test]
    fn test_from_iterator() {
        let allowed: AllowedLanguages = ["en", "fr"].into_iter().collect();
        assert!(allowed.contains("fr"));
        assert_eq!(allowed.codes().collect::<Vec<_>>(), vec!["en", "fr"]);
    }

    #[test]
    fn test_write_round_trip() {
        let allowed = AllowedLanguages::from_str("English,en\nFrench,fr\n").unwrap();
        let text = allowed.to_text().unwrap();
        assert_eq!(text, "English,en\nFrench,fr\n");
    }
}
