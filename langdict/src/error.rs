//! All error types for the langdict crate.
//!
//! Invalid language codes and duplicate keys are not errors: they are reported
//! through [`crate::report`] rows and never stop a conversion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("row {index} is malformed: expected 3 fields (language code, key, value), found {fields}")]
    MalformedRow { index: usize, fields: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("workbook has several sheets, a sheet name is required (available: {})", available.join(", "))]
    MissingSheetName { available: Vec<String> },

    #[error("sheet `{0}` not found in workbook")]
    SheetNotFound(String),

    #[error("invalid allowed language codes: {0}")]
    InvalidAllowedCodes(String),

    #[error("invalid dictionary document: {0}")]
    InvalidDocument(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a malformed-row error for the row at `index` (0-based, header excluded).
    pub fn malformed_row(index: usize, fields: usize) -> Self {
        Error::MalformedRow { index, fields }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::from(value))
    }
}
