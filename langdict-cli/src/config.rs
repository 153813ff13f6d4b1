//! Run configuration: built-in defaults, then an optional `langdict.toml`,
//! then command-line flags.

use std::path::{Path, PathBuf};

use langdict::{ClassifyOptions, IdentityMode, OutputPaths, ReadOptions};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "langdict.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dictionary XML output.
    pub output: PathBuf,
    /// Invalid-language report.
    pub error_report: PathBuf,
    /// Duplicate-key report.
    pub duplicate_report: PathBuf,
    /// Two-column `description,code` CSV of allowed language codes.
    pub allowed: PathBuf,
    /// Searched for the newest table when no source is given.
    pub source_dir: PathBuf,
    pub header_present: bool,
    pub check_language_codes: bool,
    pub sheet: Option<String>,
    pub identity_mode: IdentityMode,
}

impl Default for Config {
    fn default() -> Self {
        let paths = OutputPaths::default();
        Self {
            output: paths.document,
            error_report: paths.error_report,
            duplicate_report: paths.duplicate_report,
            allowed: PathBuf::from("allowedLanguageCodes.csv"),
            source_dir: PathBuf::from("Source"),
            header_present: false,
            check_language_codes: true,
            sheet: None,
            identity_mode: IdentityMode::default(),
        }
    }
}

/// Values given on the command line; `None`/`false` leaves the config as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub error_report: Option<PathBuf>,
    pub duplicate_report: Option<PathBuf>,
    pub allowed: Option<PathBuf>,
    pub header_exists: bool,
    pub bypass_lang_check: bool,
    pub sheet: Option<String>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        toml::from_str(s).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Loads `path` if given (it must exist), else `langdict.toml` if present,
    /// else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_toml_str(&content)
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(error_report) = overrides.error_report {
            self.error_report = error_report;
        }
        if let Some(duplicate_report) = overrides.duplicate_report {
            self.duplicate_report = duplicate_report;
        }
        if let Some(allowed) = overrides.allowed {
            self.allowed = allowed;
        }
        if overrides.header_exists {
            self.header_present = true;
        }
        if overrides.bypass_lang_check {
            self.check_language_codes = false;
        }
        if overrides.sheet.is_some() {
            self.sheet = overrides.sheet;
        }
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions::new()
            .with_header(self.header_present)
            .with_sheet(self.sheet.clone())
    }

    /// Classification options without allowed codes; the caller loads those.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions::new()
            .with_header(self.header_present)
            .with_language_check(self.check_language_codes)
            .with_identity_mode(self.identity_mode)
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            document: self.output.clone(),
            error_report: self.error_report.clone(),
            duplicate_report: self.duplicate_report.clone(),
        }
    }
}
