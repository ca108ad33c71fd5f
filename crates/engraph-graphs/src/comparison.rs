//! Combined chart overlaying two cohorts with distinct palettes
//!
//! Mirrors the single-group stacked chart, but draws both cohorts' weeks
//! side by side and tells them apart by color ramp (e.g. blue shades vs
//! green shades) rather than by legend.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::renderer::ChartRenderer;
use crate::stacked_bar::{draw_columns, BarColumn, WeekBar};
use crate::types::{ChartConfig, ColorPalette};
use engraph_common::{FrequencyTable, Result};

/// One cohort: a labelled sequence of weeks sharing a palette
#[derive(Debug, Clone)]
pub struct CohortSeries {
    /// Cohort label, appended to each week's bar label
    pub label: String,
    /// Weeks in display order
    pub weeks: Vec<WeekBar>,
    /// Palette used for every bar of this cohort
    pub palette: ColorPalette,
}

impl CohortSeries {
    pub fn new(label: impl Into<String>, palette: ColorPalette) -> Self {
        Self {
            label: label.into(),
            weeks: Vec::new(),
            palette,
        }
    }

    /// Append one week's table to the cohort
    pub fn push_week(&mut self, label: impl Into<String>, table: FrequencyTable) {
        self.weeks.push(WeekBar {
            label: label.into(),
            table,
        });
    }
}

/// Combined stacked bar chart for two cohorts
#[derive(Debug, Clone)]
pub struct CombinedEngagementChart {
    primary: CohortSeries,
    secondary: CohortSeries,
}

impl CombinedEngagementChart {
    pub fn new(primary: CohortSeries, secondary: CohortSeries) -> Self {
        Self { primary, secondary }
    }

    /// Total number of bars across both cohorts
    pub fn bar_count(&self) -> usize {
        self.primary.weeks.len() + self.secondary.weeks.len()
    }

    fn columns(&self) -> Vec<BarColumn<'_>> {
        [&self.primary, &self.secondary]
            .into_iter()
            .flat_map(|cohort| {
                cohort.weeks.iter().map(move |bar| BarColumn {
                    label: format!("{} {}", bar.label, cohort.label),
                    table: &bar.table,
                    palette: &cohort.palette,
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl ChartRenderer for CombinedEngagementChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;
        draw_columns(&root, config, &self.columns(), false)?;
        info!(
            path = %path.display(),
            bars = self.bar_count(),
            "rendered combined engagement chart"
        );
        Ok(())
    }
}
