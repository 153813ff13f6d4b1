//! File formats read and written by langdict.
//!
//! Inputs are translation tables ([`InputFormat`]); the output is the
//! dictionary XML document in [`dictionary`].

pub mod csv;
pub mod dictionary;
pub mod xlsx;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use csv::RowTable;
pub use dictionary::{Dictionary, DictionaryDocument, DictionaryTerm};

use crate::Error;

/// Supported translation table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated `language,key,value` rows.
    Csv,
    /// Excel workbook; one sheet holds the rows.
    Xlsx,
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Accepts `csv`, `xlsx` and `xlsm`, case-insensitively.
impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" => Ok(InputFormat::Xlsx),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Infers the input format from a file extension.
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Result<InputFormat, Error> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some(extension) => extension.parse(),
        None => Err(Error::UnsupportedFormat(format!(
            "no file extension: {}",
            path.as_ref().display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_format_from_extension() {
        assert_eq!(infer_format_from_extension("Source/terms.csv").unwrap(), InputFormat::Csv);
        assert_eq!(infer_format_from_extension("terms.XLSX").unwrap(), InputFormat::Xlsx);
        assert_eq!(infer_format_from_extension("terms.xlsm").unwrap(), InputFormat::Xlsx);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = infer_format_from_extension("terms.ods").unwrap_err();
        assert_eq!(err.to_string(), "unsupported format: ods");
        assert!(infer_format_from_extension("terms").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for format in [InputFormat::Csv, InputFormat::Xlsx] {
            assert_eq!(format.to_string().parse::<InputFormat>().unwrap(), format);
        }
    }
}
