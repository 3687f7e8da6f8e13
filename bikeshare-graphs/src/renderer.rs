//! Graph rendering trait shared by every chart kind

use crate::GraphConfig;
use bikeshare_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// Trait for charts that can draw themselves onto any plotters backend
pub trait GraphRenderer {
    /// Layout and styling for this chart
    fn config(&self) -> &GraphConfig;

    /// Draw the chart onto a prepared drawing area
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static;

    /// Render the chart as a PNG file
    fn render_to_file(&self, path: &Path) -> Result<()> {
        let config = self.config();
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.draw(&root)?;
        root.present()?;

        debug!(path = %path.display(), title = %config.title, "Rendered chart to file");
        Ok(())
    }

    /// Render the chart as an SVG document held in memory
    fn render_to_svg(&self) -> Result<String> {
        let config = self.config();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Get background color from style config
    fn get_background_color(&self) -> RGBColor {
        self.config()
            .style
            .background_color
            .as_deref()
            .map(parse_color)
            .unwrap_or(WHITE)
    }

    /// Get grid line color from style config
    fn get_grid_color(&self) -> RGBColor {
        self.config()
            .style
            .grid
            .color
            .as_deref()
            .map(parse_color)
            .unwrap_or(RGBColor(221, 221, 221))
    }
}

/// Parse a color string (hex format) to RGBColor
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    // Default to black if parsing fails
    BLACK
}
