//! Options for reading a translation table into rows.

/// Read behavior for [`crate::read_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Drop the first row as a header.
    pub header_present: bool,
    /// Worksheet to read from a workbook. Required when it has several sheets.
    pub sheet: Option<String>,
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header_present: bool) -> Self {
        self.header_present = header_present;
        self
    }

    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }
}
