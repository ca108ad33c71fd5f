//! Chart generation and visualization for engraph

pub mod comparison;
pub mod renderer;
pub mod stacked_bar;
pub mod types;

pub use comparison::{CohortSeries, CombinedEngagementChart};
pub use renderer::ChartRenderer;
pub use stacked_bar::{WeekBar, WeeklyEngagementChart};
pub use types::{ChartConfig, ColorPalette, FontConfig, MarginConfig, StyleConfig};
