//! Validation utilities and regex patterns

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Validate a hex color string
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hex_color"))
    }
}

/// Validate that a week group lists at least one folder
pub fn validate_folder_list(folders: &Vec<PathBuf>) -> Result<(), ValidationError> {
    if folders.is_empty() {
        return Err(ValidationError::new("empty_folder_list"));
    }
    if folders.iter().any(|folder| folder.as_os_str().is_empty()) {
        return Err(ValidationError::new("empty_folder_path"));
    }
    Ok(())
}
