use std::path::Path;

use langdict::infer_format_from_extension;

/// Checks run before any file is read or written.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub input_file: Option<String>,
    pub allowed_file: Option<String>,
    pub output_files: Vec<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_file = Some(file);
        self
    }

    pub fn with_allowed_file(mut self, file: String) -> Self {
        self.allowed_file = Some(file);
        self
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_files.push(file);
        self
    }
}

/// Validate file path exists and is a regular file
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate an output path is writable in principle, without creating anything.
///
/// Parent directories are created when a file is actually written, so a run
/// that writes nothing leaves the file system untouched.
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    let blocking_file = path_obj
        .ancestors()
        .skip(1)
        .filter(|p| !p.as_os_str().is_empty())
        .find(|p| p.exists());
    if let Some(ancestor) = blocking_file.filter(|p| !p.is_dir()) {
        return Err(format!(
            "Cannot create output directory: {} is not a directory",
            ancestor.display()
        ));
    }

    Ok(())
}

/// Validate the input is a table format langdict can read
pub fn validate_input_format(path: &str) -> Result<(), String> {
    infer_format_from_extension(path)
        .map(|_| ())
        .map_err(|e| format!("{}. Supported formats: csv, xlsx", e))
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref input) = context.input_file {
        validate_file_path(input).map_err(|e| format!("Input validation failed: {}", e))?;
        validate_input_format(input).map_err(|e| format!("Input validation failed: {}", e))?;
    }

    if let Some(ref allowed) = context.allowed_file {
        validate_file_path(allowed).map_err(|e| {
            format!(
                "Allowed language codes validation failed: {}. Pass --allowed or --bypass-lang-check",
                e
            )
        })?;
    }

    for output in &context.output_files {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    Ok(())
}
