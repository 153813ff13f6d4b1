//! Support for delimited-text translation tables.
//!
//! Rows are read as-is: no header handling and no width checks, so shape
//! problems surface later as [`crate::Error::MalformedRow`] with the right index.
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser};

/// A raw table of string cells, one `Vec` per row, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowTable {
    pub rows: Vec<Vec<String>>,
}

impl RowTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        RowTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops the first row when `header_present`.
    pub fn without_header(mut self, header_present: bool) -> Self {
        if header_present && !self.rows.is_empty() {
            self.rows.remove(0);
        }
        self
    }
}

impl Parser for RowTable {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(RowTable { rows })
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
