//! Week-folder scanning and first-column CSV extraction

use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::{debug, warn};

/// File extension treated as a daily export
pub const DATA_FILE_EXTENSION: &str = "csv";

/// Errors raised while reading a week folder
#[derive(Debug, Error)]
pub enum DataError {
    /// Input directory missing or not a directory
    #[error("Week folder not found: {0}")]
    FolderNotFound(PathBuf),

    /// I/O error while scanning or reading files
    #[error("Failed to read week folder: {0}")]
    Io(#[from] std::io::Error),

    /// A daily export row could not be parsed
    #[error("Malformed record in {file} at line {line}: {message}")]
    MalformedRecord {
        file: PathBuf,
        line: u64,
        message: String,
    },
}

impl From<DataError> for engraph_common::EngraphError {
    fn from(err: DataError) -> Self {
        engraph_common::EngraphError::data(err.to_string())
    }
}

/// Read every daily export in a week folder and collect the user identifiers
/// from the first column of each file.
///
/// Files whose extension is not `.csv` (case-insensitive) and non-file
/// entries such as subdirectories are silently skipped. The first row of
/// each file is treated as a header. A folder with no matching files yields
/// an empty sequence; a malformed file aborts the whole folder.
///
/// Enumeration order is filesystem-dependent; callers must not rely on the
/// ordering of the returned identifiers.
pub fn read_week_folder(path: &Path) -> Result<Vec<String>, DataError> {
    if !path.is_dir() {
        return Err(DataError::FolderNotFound(path.to_path_buf()));
    }

    let mut user_ids = Vec::new();
    let mut matched_files = 0usize;

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_path = entry.path();
        if !file_path.is_file() || !is_data_file(&file_path) {
            continue;
        }
        matched_files += 1;
        read_first_column(&file_path, &mut user_ids)?;
    }

    if matched_files == 0 {
        warn!(folder = %path.display(), "no daily exports found in week folder");
    } else {
        debug!(
            folder = %path.display(),
            files = matched_files,
            identifiers = user_ids.len(),
            "collected identifiers from week folder"
        );
    }

    Ok(user_ids)
}

fn is_data_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION))
}

/// Append the first column of every data row in `path` to `out`.
///
/// Ragged rows are accepted as long as the first field is present; a row
/// with no fields at all, or a CSV-level parse failure, aborts the file.
fn read_first_column(path: &Path, out: &mut Vec<String>) -> Result<(), DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| {
            let line = err
                .position()
                .map(|pos| pos.line())
                .unwrap_or_default();
            DataError::MalformedRecord {
                file: path.to_path_buf(),
                line,
                message: err.to_string(),
            }
        })?;

    for result in reader.records() {
        let record = result.map_err(|err| {
            let line = err
                .position()
                .map(|pos| pos.line())
                .unwrap_or_default();
            DataError::MalformedRecord {
                file: path.to_path_buf(),
                line,
                message: err.to_string(),
            }
        })?;

        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or_default();
        match record.get(0) {
            Some(value) => out.push(value.to_string()),
            None => {
                return Err(DataError::MalformedRecord {
                    file: path.to_path_buf(),
                    line,
                    message: "row has no columns".to_string(),
                })
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_reads_first_column_skipping_header() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "day1.csv",
            "user_id,opened_at\nalice,2024-01-01\nbob,2024-01-01\n",
        );

        let mut ids = read_week_folder(dir.path()).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_concatenates_across_files() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "day1.csv", "user_id\nalice\nbob\nalice\n");
        write_file(dir.path(), "day2.csv", "user_id\nalice\ncarol\n");

        let ids = read_week_folder(dir.path()).unwrap();
        assert_eq!(ids.len(), 5);
        assert_eq!(ids.iter().filter(|id| *id == "alice").count(), 3);
    }

    #[test]
    fn test_skips_non_csv_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "day1.csv", "user_id\nalice\n");
        write_file(dir.path(), "notes.txt", "not a data file\n");
        fs::create_dir(dir.path().join("nested")).unwrap();

        let ids = read_week_folder(dir.path()).unwrap();
        assert_eq!(ids, vec!["alice".to_string()]);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "day1.CSV", "user_id\nalice\n");

        let ids = read_week_folder(dir.path()).unwrap();
        assert_eq!(ids, vec!["alice".to_string()]);
    }

    #[test]
    fn test_missing_folder_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = read_week_folder(&missing).unwrap_err();
        assert!(matches!(err, DataError::FolderNotFound(_)));
    }

    #[test]
    fn test_empty_folder_yields_empty_sequence() {
        let dir = TempDir::new().unwrap();
        let ids = read_week_folder(dir.path()).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "day1.csv", "user_id\n");

        let ids = read_week_folder(dir.path()).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "day1.csv",
            "user_id,opened_at\nalice\nbob,2024-01-01,extra\n",
        );

        let mut ids = read_week_folder(dir.path()).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_malformed_file_aborts_folder() {
        let dir = TempDir::new().unwrap();
        let mut file = File::create(dir.path().join("day1.csv")).unwrap();
        // Invalid UTF-8 in the data rows fails record decoding
        file.write_all(b"user_id\n\xff\xfe\xfd\n").unwrap();

        let err = read_week_folder(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::MalformedRecord { .. }));
    }
}
