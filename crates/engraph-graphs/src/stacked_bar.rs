//! Stacked bar chart for weekly open-frequency distributions
//!
//! One bar per week, one segment per open-count bucket, stacked
//! bottom-to-top in ascending bucket order. Segments are annotated with
//! their percentage share and each bar with its user total.

use std::collections::BTreeSet;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::renderer::ChartRenderer;
use crate::types::{ChartConfig, ColorPalette};
use engraph_common::{EngraphError, FrequencyTable, Result};

/// One bar of the chart: a labelled week's frequency table
#[derive(Debug, Clone)]
pub struct WeekBar {
    pub label: String,
    pub table: FrequencyTable,
}

/// A bar column paired with the palette used for its segments
pub(crate) struct BarColumn<'a> {
    pub label: String,
    pub table: &'a FrequencyTable,
    pub palette: &'a ColorPalette,
}

/// A positioned stacked segment, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment {
    pub x: usize,
    pub frequency: u32,
    pub bottom: f64,
    pub top: f64,
    pub percentage: f64,
}

/// Stack each bar's rows bottom-to-top in ascending frequency order.
///
/// The top of a bar's last segment equals the bar's user total.
pub(crate) fn compute_segments(columns: &[BarColumn<'_>]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (x, column) in columns.iter().enumerate() {
        let mut bottom = 0.0;
        for row in column.table.rows() {
            let top = bottom + f64::from(row.tally);
            segments.push(Segment {
                x,
                frequency: row.frequency,
                bottom,
                top,
                percentage: row.percentage,
            });
            bottom = top;
        }
    }
    segments
}

/// Draw stacked bar columns onto a prepared drawing area.
///
/// The legend maps open-counts to colors and is only meaningful when every
/// column shares one palette; multi-palette callers pass `show_legend =
/// false` (the combined chart relies on its shade ramps instead).
pub(crate) fn draw_columns<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    columns: &[BarColumn<'_>],
    show_legend: bool,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if columns.is_empty() {
        return Err(EngraphError::chart("no weeks to render"));
    }

    let labels: Vec<String> = columns.iter().map(|column| column.label.clone()).collect();
    let max_total = columns
        .iter()
        .map(|column| column.table.total_users())
        .max()
        .unwrap_or(0);
    // Keep a sane axis even when every table is empty
    let y_max = if max_total == 0 {
        10.0
    } else {
        f64::from(max_total) * 1.15
    };
    let x_max = columns.len() as f64 - 0.5;

    let title_font = (
        config.style.title_font.family.as_str(),
        config.style.title_font.size,
    );
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, title_font)
        .margin(config.style.margins.top)
        .x_label_area_size(config.style.margins.bottom)
        .y_label_area_size(config.style.margins.left)
        .build_cartesian_2d(-0.5f64..x_max, 0f64..y_max)?;

    let format_x_label = |x: &f64| {
        let idx = x.round();
        if idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&format_x_label);
    if let Some(y_label) = &config.y_label {
        mesh.y_desc(y_label);
    }
    if let Some(x_label) = &config.x_label {
        mesh.x_desc(x_label);
    }
    mesh.draw()?;

    let segments = compute_segments(columns);

    if show_legend {
        // One series per open-count so the legend lists each bucket once
        let frequencies: BTreeSet<u32> =
            segments.iter().map(|segment| segment.frequency).collect();
        for frequency in frequencies {
            let color = columns[0].palette.color_for(frequency);
            chart
                .draw_series(
                    segments
                        .iter()
                        .filter(|segment| segment.frequency == frequency)
                        .map(|segment| {
                            Rectangle::new(
                                [
                                    (segment.x as f64 - 0.35, segment.bottom),
                                    (segment.x as f64 + 0.35, segment.top),
                                ],
                                color.filled(),
                            )
                        }),
                )?
                .label(format!("Frequency {}", frequency))
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }
    } else {
        chart.draw_series(segments.iter().map(|segment| {
            let color = columns[segment.x].palette.color_for(segment.frequency);
            Rectangle::new(
                [
                    (segment.x as f64 - 0.35, segment.bottom),
                    (segment.x as f64 + 0.35, segment.top),
                ],
                color.filled(),
            )
        }))?;
    }

    // Percentage annotations centered inside each segment
    let label_font = (
        config.style.label_font.family.as_str(),
        config.style.label_font.size,
    )
        .into_font();
    let percentage_style = TextStyle::from(label_font.clone())
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(segments.iter().map(|segment| {
        Text::new(
            format!("{:.2}%", segment.percentage),
            (segment.x as f64, (segment.bottom + segment.top) / 2.0),
            percentage_style.clone(),
        )
    }))?;

    // User totals above each non-empty bar
    let total_style = TextStyle::from(label_font)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(
        columns
            .iter()
            .enumerate()
            .filter(|(_, column)| !column.table.is_empty())
            .map(|(x, column)| {
                Text::new(
                    column.table.total_users().to_string(),
                    (x as f64, f64::from(column.table.total_users())),
                    total_style.clone(),
                )
            }),
    )?;

    if show_legend {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Stacked bar chart renderer for one group of weeks
#[derive(Debug, Clone)]
pub struct WeeklyEngagementChart {
    bars: Vec<WeekBar>,
    palette: ColorPalette,
}

impl WeeklyEngagementChart {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            bars: Vec::new(),
            palette,
        }
    }

    /// Append one week's table as the next bar
    pub fn push_week(&mut self, label: impl Into<String>, table: FrequencyTable) {
        self.bars.push(WeekBar {
            label: label.into(),
            table,
        });
    }

    pub fn bars(&self) -> &[WeekBar] {
        &self.bars
    }

    fn columns(&self) -> Vec<BarColumn<'_>> {
        self.bars
            .iter()
            .map(|bar| BarColumn {
                label: bar.label.clone(),
                table: &bar.table,
                palette: &self.palette,
            })
            .collect()
    }
}

impl Default for WeeklyEngagementChart {
    fn default() -> Self {
        Self::new(ColorPalette::default())
    }
}

#[async_trait::async_trait]
impl ChartRenderer for WeeklyEngagementChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;
        draw_columns(&root, config, &self.columns(), true)?;
        info!(path = %path.display(), bars = self.bars.len(), "rendered weekly engagement chart");
        Ok(())
    }
}
