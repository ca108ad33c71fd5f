//! Chart rendering trait and shared drawing helpers

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::types::{parse_hex_color, ChartConfig};
use engraph_common::Result;

/// Trait for chart renderers that write report images
#[async_trait::async_trait]
pub trait ChartRenderer {
    /// Render the chart to an image file
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Parse a hex color string, defaulting to black
    fn parse_color(&self, color_str: &str) -> RGBColor {
        parse_hex_color(color_str).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Background color from the style config, defaulting to white
    fn background_color(&self, config: &ChartConfig) -> RGBColor {
        parse_hex_color(&config.style.background_color).unwrap_or(RGBColor(255, 255, 255))
    }

    /// Fill the drawing area with the configured background
    fn apply_styling<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let bg_color = self.background_color(config);
        root.fill(&bg_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer;

    #[async_trait::async_trait]
    impl ChartRenderer for MockRenderer {
        async fn render_to_file(&self, _config: &ChartConfig, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_color_parsing() {
        let renderer = MockRenderer;
        assert_eq!(renderer.parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(renderer.parse_color("invalid"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_background_color() {
        let renderer = MockRenderer;
        let mut config = ChartConfig::default();
        assert_eq!(renderer.background_color(&config), RGBColor(255, 255, 255));

        config.style.background_color = "#2b2b2b".to_string();
        assert_eq!(renderer.background_color(&config), RGBColor(43, 43, 43));
    }
}
