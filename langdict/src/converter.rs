//! End-to-end helpers: table file in, classification and dictionary out.
//!
//! The CLI drives these; library users can call them directly or compose
//! [`read_rows`], [`crate::partition`] and the [`Parser`] writers themselves.

use std::path::{Path, PathBuf};

use crate::{
    classifier::{Classification, Classifier, ClassifyOptions},
    error::Error,
    formats::{DictionaryDocument, InputFormat, RowTable, infer_format_from_extension, xlsx},
    read_options::ReadOptions,
    traits::Parser,
};

/// Reads the rows of a CSV or workbook file, header removed when configured.
pub fn read_rows<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<RowTable, Error> {
    let path = path.as_ref();
    let format = infer_format_from_extension(path)?;
    tracing::debug!(path = %path.display(), %format, "reading translation table");

    let table = match format {
        InputFormat::Csv => RowTable::read_from(path)?,
        InputFormat::Xlsx => xlsx::read_sheet(path, options.sheet.as_deref())?,
    };
    Ok(table.without_header(options.header_present))
}

/// Reads and classifies a translation table.
///
/// `classify.header_present` is forced to match `read.header_present` so
/// reported row numbers agree with the file.
pub fn classify_file<P: AsRef<Path>>(
    path: P,
    read: &ReadOptions,
    classify: &ClassifyOptions,
) -> Result<Classification, Error> {
    let table = read_rows(path, read)?;
    let options = classify.clone().with_header(read.header_present);
    Classifier::new(options).partition(&table.rows)
}

/// Where a conversion writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub document: PathBuf,
    pub error_report: PathBuf,
    pub duplicate_report: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths {
            document: PathBuf::from("Result/output.xml"),
            error_report: PathBuf::from("errors.csv"),
            duplicate_report: PathBuf::from("Result/duplicates.csv"),
        }
    }
}

/// What [`write_outputs`] actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub document: Option<PathBuf>,
    pub error_report: Option<PathBuf>,
    pub duplicate_report: Option<PathBuf>,
}

/// Writes the reports (only when non-empty) and, if `write_document`, the XML.
pub fn write_outputs(
    classification: &Classification,
    paths: &OutputPaths,
    write_document: bool,
) -> Result<WrittenOutputs, Error> {
    let mut written = WrittenOutputs::default();

    if !classification.invalid_languages.is_empty() {
        classification
            .invalid_languages
            .write_to(&paths.error_report)?;
        written.error_report = Some(paths.error_report.clone());
    }

    if !classification.duplicates.is_empty() {
        classification.duplicates.write_to(&paths.duplicate_report)?;
        written.duplicate_report = Some(paths.duplicate_report.clone());
    }

    if write_document {
        DictionaryDocument::from(classification).write_to(&paths.document)?;
        written.document = Some(paths.document.clone());
    }

    Ok(written)
}

/// Converts `input` to a dictionary document, writing reports alongside.
pub fn convert<P: AsRef<Path>>(
    input: P,
    read: &ReadOptions,
    classify: &ClassifyOptions,
    paths: &OutputPaths,
) -> Result<(Classification, WrittenOutputs), Error> {
    let classification = classify_file(input, read, classify)?;
    let written = write_outputs(&classification, paths, true)?;
    Ok((classification, written))
}
