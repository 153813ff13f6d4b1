use std::path::PathBuf;

use langdict::traits::Parser as _;
use langdict::{AllowedLanguages, Classification, classify_file, write_outputs};
use langdict_cli::Config;
use langdict_cli::resolve_source;
use langdict_cli::validation::{ValidationContext, validate_context};
use serde_json::json;

const LANGUAGE_CODE_REFERENCE: &str =
    "https://success.mindtouch.com/Admin/Instant_Translation/Reference_for_Language_Codes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Reports plus dictionary XML.
    Convert,
    /// Reports only; fails when language codes are invalid.
    Check,
    /// As `Check`, with a JSON summary on stdout.
    CheckJson,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// Loads the allowed codes when the check is enabled; an empty set otherwise.
fn load_allowed_languages(config: &Config) -> AllowedLanguages {
    if !config.check_language_codes {
        return AllowedLanguages::new();
    }
    let allowed = AllowedLanguages::read_from(&config.allowed).unwrap_or_else(|e| {
        fail(format!(
            "Cannot read allowed language codes from {}: {}",
            config.allowed.display(),
            e
        ))
    });
    let malformed = allowed.malformed_codes();
    if !malformed.is_empty() {
        tracing::warn!(
            codes = %malformed.join(", "),
            "allowed language codes that are not BCP 47 identifiers"
        );
    }
    allowed
}

/// Run convert/check: classify the source, write reports, and optionally the XML.
pub fn run_analysis_command(
    config: &Config,
    source: Option<PathBuf>,
    mode: AnalysisMode,
    verbose: bool,
) {
    let source = resolve_source(source, &config.source_dir).unwrap_or_else(|e| fail(e));
    if verbose {
        println!("Path to source file: {}", source.display());
    }

    let mut context = ValidationContext::new()
        .with_input_file(source.to_string_lossy().to_string())
        .with_output_file(config.error_report.to_string_lossy().to_string())
        .with_output_file(config.duplicate_report.to_string_lossy().to_string());
    if config.check_language_codes {
        context = context.with_allowed_file(config.allowed.to_string_lossy().to_string());
    }
    if mode == AnalysisMode::Convert {
        context = context.with_output_file(config.output.to_string_lossy().to_string());
    }
    if let Err(e) = validate_context(&context) {
        fail(e);
    }

    let classify = config
        .classify_options()
        .with_allowed_codes(load_allowed_languages(config));
    let classification = classify_file(&source, &config.read_options(), &classify)
        .unwrap_or_else(|e| fail(format!("Cannot process {}: {}", source.display(), e)));

    let written = write_outputs(
        &classification,
        &config.output_paths(),
        mode == AnalysisMode::Convert,
    )
    .unwrap_or_else(|e| fail(e));

    if mode == AnalysisMode::CheckJson {
        print_json_summary(&source, &classification);
    } else {
        print_text_summary(&classification, &written, verbose);
    }

    if mode != AnalysisMode::Convert && !classification.invalid_languages.is_empty() {
        std::process::exit(1);
    }
}

fn print_text_summary(
    classification: &Classification,
    written: &langdict::WrittenOutputs,
    verbose: bool,
) {
    if let Some(path) = &written.error_report {
        println!(
            "❌ {} row(s) with invalid language codes. See {} for the list.",
            classification.invalid_languages.len(),
            path.display()
        );
        println!("Visit {} for more information.", LANGUAGE_CODE_REFERENCE);
    }

    if !classification.duplicates.is_empty() {
        println!("Duplicates:");
        for row in &classification.duplicates {
            println!(
                "  {}: row: {} key: {} value: {}",
                row.language_code, row.source_row, row.key, row.value
            );
        }
        if let Some(path) = &written.duplicate_report {
            println!("Duplicate rows written to {}", path.display());
        }
    }

    if verbose {
        for group in &classification.groups {
            group.dump("\n", false);
        }
    }

    if !classification.has_issues() {
        println!("✅ No issues found!");
    }

    if let Some(path) = &written.document {
        println!(
            "✅ Success! Your file is at {}",
            path.to_string_lossy().replace('\\', "/")
        );
    }
}

fn print_json_summary(source: &std::path::Path, classification: &Classification) {
    let groups: Vec<_> = classification
        .groups
        .iter()
        .map(|group| {
            json!({
                "language": group.language_code(),
                "terms": group.len(),
                "duplicates": group.find_duplicates().len(),
            })
        })
        .collect();
    let invalid: Vec<_> = classification
        .invalid_languages
        .iter()
        .map(|row| {
            json!({
                "row": row.display_row,
                "language": row.language_code,
                "key": row.key,
                "value": row.value,
            })
        })
        .collect();
    let body = json!({
        "source": source.to_string_lossy(),
        "summary": {
            "languages": classification.groups.len(),
            "terms": classification.term_count(),
            "invalid_language_rows": classification.invalid_languages.len(),
            "duplicate_rows": classification.duplicates.len(),
        },
        "languages": groups,
        "invalid_languages": invalid,
        "duplicates": classification.duplicates,
    });
    match serde_json::to_string_pretty(&body) {
        Ok(text) => println!("{}", text),
        Err(e) => fail(e),
    }
}
