//! Week-folder ingestion and frequency aggregation for engraph

pub mod aggregator;
pub mod reader;

pub use aggregator::FrequencyAggregator;
pub use reader::{read_week_folder, DataError, DATA_FILE_EXTENSION};
