//! Support for Excel workbooks (`.xlsx`, `.xlsm`).
//!
//! A workbook with a single sheet is read without a sheet name; otherwise the
//! name is required.
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::{error::Error, formats::csv::RowTable};

/// Reads one worksheet into a [`RowTable`].
///
/// Each cell is rendered as its display string. Trailing empty cells are
/// trimmed and rows with no content are skipped, so a sheet whose used range
/// is wider than the data still yields three-field rows.
pub fn read_sheet<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<RowTable, Error> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;
    let sheet_names = workbook.sheet_names();

    let name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(Error::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => match sheet_names.as_slice() {
            [only] => only.clone(),
            _ => {
                return Err(Error::MissingSheetName {
                    available: sheet_names,
                });
            }
        },
    };

    tracing::debug!(sheet = %name, "reading worksheet");
    let range = workbook.worksheet_range(&name)?;
    Ok(RowTable::new(
        range.rows().filter_map(row_to_strings).collect(),
    ))
}

fn row_to_strings(row: &[Data]) -> Option<Vec<String>> {
    let mut cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    if cells.is_empty() { None } else { Some(cells) }
}
