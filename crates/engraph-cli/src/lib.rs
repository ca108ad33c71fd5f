//! Report generation pipeline for the engraph binary

pub mod pipeline;

pub use pipeline::{ReportPipeline, WeekReport};
