#![forbid(unsafe_code)]
//! Turn translation tables into CXone Expert custom dictionaries.
//!
//! Rows of `(language code, key, value)` are grouped by language, checked
//! against a list of allowed language codes, scanned for keys that appear more
//! than once per language, and written as a nested `<dictionaries>` XML
//! document. Problems are reported, never silently fixed: duplicate terms
//! still end up in the document.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langdict::{AllowedLanguages, ClassifyOptions, OutputPaths, ReadOptions, convert};
//! use langdict::traits::Parser;
//!
//! let allowed = AllowedLanguages::read_from("allowedLanguageCodes.csv")?;
//! let classify = ClassifyOptions::new().with_allowed_codes(allowed);
//! let read = ReadOptions::new().with_header(true);
//!
//! let (classification, written) =
//!     convert("Source/terms.csv", &read, &classify, &OutputPaths::default())?;
//! for row in &classification.duplicates {
//!     println!("duplicate at row {}: {}", row.source_row, row.key);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pieces
//!
//! - [`Term`], [`LanguageGroup`]: the data model and per-language duplicate detection
//! - [`Classifier`]: grouping, language-code validation and report collection
//! - [`formats`]: CSV and Excel row sources, dictionary XML
//! - [`AllowedLanguages`]: the allowed-code list
//! - [`report`]: invalid-language and duplicate report rows

pub mod classifier;
pub mod converter;
pub mod error;
pub mod formats;
pub mod group;
pub mod languages;
pub mod read_options;
pub mod report;
pub mod term;
pub mod traits;

pub use crate::{
    classifier::{Classification, Classifier, ClassifyOptions, SourceRow, partition},
    converter::{OutputPaths, WrittenOutputs, classify_file, convert, read_rows, write_outputs},
    error::Error,
    formats::{DictionaryDocument, InputFormat, RowTable, infer_format_from_extension},
    group::LanguageGroup,
    languages::AllowedLanguages,
    read_options::ReadOptions,
    report::{DuplicateRow, InvalidLanguageRow, display_row_number},
    term::{IdentityKey, IdentityMode, Term, compare_optional},
};
