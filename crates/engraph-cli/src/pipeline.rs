//! End-to-end report pipeline: aggregate week folders, export tables,
//! render charts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use engraph_common::{EngraphError, FrequencyTable, Result};
use engraph_config::{default_palette, Config, WeekGroup};
use engraph_data::FrequencyAggregator;
use engraph_graphs::{
    ChartConfig, ChartRenderer, CohortSeries, ColorPalette, CombinedEngagementChart, FontConfig,
    StyleConfig, WeeklyEngagementChart,
};

/// One aggregated week, as exported to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekReport {
    /// Week label (folder basename)
    pub week: String,
    /// Open-frequency distribution for the week
    pub table: FrequencyTable,
}

/// Drives aggregation and rendering for every configured group.
///
/// Weeks are processed sequentially; any folder error aborts the run.
pub struct ReportPipeline {
    config: Config,
    aggregator: FrequencyAggregator,
}

impl ReportPipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            aggregator: FrequencyAggregator::new(),
        }
    }

    /// Run the whole report: one chart per group, plus the optional
    /// combined chart and JSON exports.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<()> {
        fs::create_dir_all(&self.config.output.directory)?;

        let mut aggregated: HashMap<String, Vec<WeekReport>> = HashMap::new();

        for group in &self.config.weeks {
            let reports = self.aggregate_group(group)?;

            if self.config.output.export_tables {
                self.export_tables(&group.label, &reports)?;
            }

            self.render_group_chart(group, &reports).await?;
            aggregated.insert(group.label.clone(), reports);
        }

        if let Some(combined) = &self.config.combined {
            let primary = aggregated.get(&combined.primary).ok_or_else(|| {
                EngraphError::config(format!("unknown combined group: {}", combined.primary))
            })?;
            let secondary = aggregated.get(&combined.secondary).ok_or_else(|| {
                EngraphError::config(format!("unknown combined group: {}", combined.secondary))
            })?;
            self.render_combined_chart(&combined.label, primary, secondary)
                .await?;
        }

        info!(
            groups = self.config.weeks.len(),
            output = %self.config.output.directory.display(),
            "report generation complete"
        );
        Ok(())
    }

    /// Aggregate every week folder of a group, in configured order
    fn aggregate_group(&self, group: &WeekGroup) -> Result<Vec<WeekReport>> {
        let mut reports = Vec::with_capacity(group.folders.len());
        for folder in &group.folders {
            let table = self.aggregator.aggregate_week_folder(folder)?;
            let week = week_label(folder);
            info!(
                group = %group.label,
                week = %week,
                users = table.total_users(),
                "aggregated week"
            );
            reports.push(WeekReport { week, table });
        }
        Ok(reports)
    }

    /// Write a group's frequency tables as a JSON report
    fn export_tables(&self, label: &str, reports: &[WeekReport]) -> Result<()> {
        let path = self
            .config
            .output
            .directory
            .join(format!("{label}_tables.json"));
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, reports)?;
        debug!(path = %path.display(), "exported frequency tables");
        Ok(())
    }

    async fn render_group_chart(&self, group: &WeekGroup, reports: &[WeekReport]) -> Result<()> {
        let palette = self.group_palette(group);
        let mut chart = WeeklyEngagementChart::new(palette);
        for report in reports {
            chart.push_week(report.week.clone(), report.table.clone());
        }

        let config = self.chart_config(format!(
            "{} ({})",
            self.config.chart.title, group.label
        ));
        let path = self.output_path(&group.label);
        chart.render_to_file(&config, &path).await
    }

    async fn render_combined_chart(
        &self,
        label: &str,
        primary: &[WeekReport],
        secondary: &[WeekReport],
    ) -> Result<()> {
        let combined = self.config.combined.as_ref().ok_or_else(|| {
            EngraphError::config("combined chart requested without combined configuration")
        })?;

        let mut primary_cohort = CohortSeries::new(
            combined.primary.clone(),
            self.cohort_palette(&combined.primary, ColorPalette::blue_shades()),
        );
        for report in primary {
            primary_cohort.push_week(report.week.clone(), report.table.clone());
        }

        let mut secondary_cohort = CohortSeries::new(
            combined.secondary.clone(),
            self.cohort_palette(&combined.secondary, ColorPalette::green_shades()),
        );
        for report in secondary {
            secondary_cohort.push_week(report.week.clone(), report.table.clone());
        }

        let chart = CombinedEngagementChart::new(primary_cohort, secondary_cohort);
        let config = self.chart_config(format!("{} ({})", self.config.chart.title, label));
        let path = self.output_path(label);
        chart.render_to_file(&config, &path).await
    }

    /// Group palette: explicit override, otherwise the default color map
    fn group_palette(&self, group: &WeekGroup) -> ColorPalette {
        let colors = group.palette.clone().unwrap_or_else(default_palette);
        ColorPalette::new(colors, self.config.chart.fallback_color.clone())
    }

    /// Cohort palette for the combined chart: explicit group override,
    /// otherwise the given shade ramp
    fn cohort_palette(&self, group_label: &str, ramp: ColorPalette) -> ColorPalette {
        match self.config.group(group_label).and_then(|g| g.palette.clone()) {
            Some(colors) => ColorPalette::new(colors, self.config.chart.fallback_color.clone()),
            None => ramp,
        }
    }

    fn chart_config(&self, title: String) -> ChartConfig {
        let settings = &self.config.chart;
        ChartConfig {
            title,
            width: settings.width,
            height: settings.height,
            x_label: None,
            y_label: Some("Number of Users".to_string()),
            style: StyleConfig {
                background_color: settings.background_color.clone(),
                title_font: FontConfig {
                    family: "sans-serif".to_string(),
                    size: settings.title_font_size,
                },
                label_font: FontConfig {
                    family: "sans-serif".to_string(),
                    size: settings.label_font_size,
                },
                ..StyleConfig::default()
            },
        }
    }

    fn output_path(&self, label: &str) -> PathBuf {
        self.config.output.directory.join(format!("{label}.png"))
    }
}

/// X-axis label for a week folder: its basename
fn week_label(folder: &Path) -> String {
    folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}
