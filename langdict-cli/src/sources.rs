use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::Pattern;

/// Table extensions picked up from the source directory.
const SOURCE_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xlsm"];

/// The most recently modified table in `dir`, if any.
pub fn latest_source_file(dir: &Path) -> Option<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for extension in SOURCE_EXTENSIONS {
        // The directory is matched literally; only the file name is a pattern.
        let pattern = format!(
            "{}/*.{}",
            Pattern::escape(&dir.to_string_lossy()),
            extension
        );
        let Ok(paths) = glob::glob(&pattern) else {
            continue;
        };
        for path in paths.flatten() {
            let Ok(modified) = path.metadata().and_then(|m| m.modified()) else {
                continue;
            };
            if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
                newest = Some((modified, path));
            }
        }
    }

    newest.map(|(_, path)| path)
}

/// Uses `explicit` when given, otherwise the newest table in `source_dir`.
pub fn resolve_source(explicit: Option<PathBuf>, source_dir: &Path) -> Result<PathBuf, String> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let path = latest_source_file(source_dir).ok_or_else(|| {
        format!(
            "No source file given and no .csv, .xlsx or .xlsm file found in {}",
            source_dir.display()
        )
    })?;
    tracing::debug!(path = %path.display(), "using most recent source file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_latest_source_file_picks_newest() {
        let temp_dir = TempDir::new().unwrap();
        let older = temp_dir.path().join("older.csv");
        let newer = temp_dir.path().join("newer.xlsx");
        fs::write(&older, "en,k,v\n").unwrap();
        fs::write(&newer, "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let now = SystemTime::now();
        File::options()
            .write(true)
            .open(&older)
            .unwrap()
            .set_modified(now - Duration::from_secs(3600))
            .unwrap();
        File::options()
            .write(true)
            .open(&newer)
            .unwrap()
            .set_modified(now)
            .unwrap();

        assert_eq!(latest_source_file(temp_dir.path()), Some(newer));
    }

    #[test]
    fn test_latest_source_file_in_directory_with_glob_characters() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("batch [2024] *");
        fs::create_dir_all(&dir).unwrap();
        let workbook = dir.join("terms.xlsm");
        fs::write(&workbook, "").unwrap();

        assert_eq!(latest_source_file(&dir), Some(workbook));
    }

    #[test]
    fn test_latest_source_file_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(latest_source_file(temp_dir.path()), None);
        assert!(latest_source_file(&temp_dir.path().join("missing")).is_none());
    }

    #[test]
    fn test_resolve_source_prefers_explicit() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = PathBuf::from("given.csv");
        assert_eq!(
            resolve_source(Some(explicit.clone()), temp_dir.path()).unwrap(),
            explicit
        );
        let err = resolve_source(None, temp_dir.path()).unwrap_err();
        assert!(err.contains("No source file given"));
    }
}
