//! Application configuration structures

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::validation;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Reporting groups; each group becomes one stacked bar chart
    #[serde(default)]
    pub weeks: Vec<WeekGroup>,

    /// Optional combined chart pairing two groups with distinct palettes
    #[serde(default)]
    pub combined: Option<CombinedConfig>,

    /// Output settings
    #[serde(default)]
    #[validate]
    pub output: OutputConfig,

    /// Chart rendering settings
    #[serde(default)]
    #[validate]
    pub chart: ChartSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// One reporting group: a labelled list of week folders
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeekGroup {
    /// Group label, used for output file names and chart titles
    #[validate(length(min = 1, message = "Group label cannot be empty"))]
    pub label: String,

    /// Week folders, one per bar, in display order
    #[validate(custom = "crate::validation::validate_folder_list")]
    pub folders: Vec<PathBuf>,

    /// Optional palette override keyed by open-count (hex colors)
    #[serde(default)]
    pub palette: Option<BTreeMap<u32, String>>,
}

/// Combined chart configuration referencing two group labels
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CombinedConfig {
    /// Output label for the combined chart
    #[validate(length(min = 1, message = "Combined label cannot be empty"))]
    pub label: String,

    /// Label of the first cohort group
    #[validate(length(min = 1, message = "Primary group label cannot be empty"))]
    pub primary: String,

    /// Label of the second cohort group
    #[validate(length(min = 1, message = "Secondary group label cannot be empty"))]
    pub secondary: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Directory where charts (and exported tables) are written
    pub directory: PathBuf,

    /// Also write each group's frequency tables as JSON
    #[serde(default)]
    pub export_tables: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("reports"),
            export_tables: false,
        }
    }
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChartSettings {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Chart title
    #[validate(length(min = 1, message = "Chart title cannot be empty"))]
    pub title: String,

    /// Background color (hex format)
    #[validate(custom = "crate::validation::validate_hex_color")]
    pub background_color: String,

    /// Color used for open-counts missing from the palette (hex format)
    #[validate(custom = "crate::validation::validate_hex_color")]
    pub fallback_color: String,

    /// Title font size
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub title_font_size: u32,

    /// Segment/axis label font size
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub label_font_size: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            title: "Weekly Email Open Frequencies".to_string(),
            background_color: "#FFFFFF".to_string(),
            fallback_color: "#333333".to_string(),
            title_font_size: 24,
            label_font_size: 14,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter
    pub level: String,

    /// Pretty formatting with colors
    pub pretty: bool,

    /// Optional log file path
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: true,
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Convert into the common logging configuration
    pub fn to_logging_config(&self) -> engraph_common::LoggingConfig {
        engraph_common::LoggingConfig {
            level: self.level.clone(),
            pretty_format: self.pretty,
            file_path: self.file.clone(),
            ..engraph_common::LoggingConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weeks: Vec::new(),
            combined: None,
            output: OutputConfig::default(),
            chart: ChartSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Default open-count palette: blue, orange, green, red
pub fn default_palette() -> BTreeMap<u32, String> {
    BTreeMap::from([
        (1, "#1f77b4".to_string()),
        (2, "#ff7f0e".to_string()),
        (3, "#2ca02c".to_string()),
        (4, "#d62728".to_string()),
    ])
}

impl Config {
    /// Validate the whole configuration tree, including per-group palettes
    /// and cross-references the derive cannot express.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        for group in &self.weeks {
            group.validate()?;
            if let Some(palette) = &group.palette {
                for color in palette.values() {
                    validation::validate_hex_color(color).map_err(|err| {
                        let mut errors = ValidationErrors::new();
                        errors.add("palette", err);
                        errors
                    })?;
                }
            }
        }

        if let Some(combined) = &self.combined {
            combined.validate()?;
            for cohort in [&combined.primary, &combined.secondary] {
                if !self.weeks.iter().any(|group| &group.label == cohort) {
                    let mut errors = ValidationErrors::new();
                    errors.add("combined", validator::ValidationError::new("unknown_group_label"));
                    return Err(errors);
                }
            }
        }

        Ok(())
    }

    /// Look up a week group by label
    pub fn group(&self, label: &str) -> Option<&WeekGroup> {
        self.weeks.iter().find(|group| group.label == label)
    }
}
