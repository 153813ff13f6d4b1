//! Side-channel report rows produced by classification, and their CSV form.
//!
//! Neither report blocks XML generation: they are advisory.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::{error::Error, term::Term, traits::Parser};

/// A row whose language code is not in the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidLanguageRow {
    /// Row number as shown to users, see [`display_row_number`].
    #[serde(rename = "source row number")]
    pub display_row: usize,
    #[serde(rename = "language code")]
    pub language_code: String,
    pub key: String,
    pub value: String,
}

/// A term whose key appears more than once within its language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRow {
    /// 0-based row index, header excluded.
    pub source_row: usize,
    pub language_code: String,
    pub key: String,
    pub value: String,
}

impl DuplicateRow {
    pub fn from_term(language_code: &str, term: &Term) -> Self {
        DuplicateRow {
            source_row: term.source_row(),
            language_code: language_code.to_string(),
            key: term.key().to_string(),
            value: term.value().to_string(),
        }
    }
}

/// Reconstructs the row number reported for the 0-based row `index`.
///
/// The offset is `+3` with a header row and `+2` without. Existing error
/// reports depend on these exact numbers.
pub fn display_row_number(index: usize, header_present: bool) -> usize {
    if header_present { index + 3 } else { index + 2 }
}

/// Written with a `source row number,language code,key,value` header.
impl Parser for Vec<InvalidLanguageRow> {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(["source row number", "language code", "key", "value"])?;
        for row in self {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Written without a header, rows in the order given.
impl Parser for Vec<DuplicateRow> {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for row in self {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
