//! Configuration management for engraph

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    default_palette, ChartSettings, CombinedConfig, Config, LoggingSettings, OutputConfig,
    WeekGroup,
};
