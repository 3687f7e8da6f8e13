//! Pie chart drawn from polygon wedges

use crate::{parse_color, GraphConfig, GraphRenderer};
use bikeshare_common::{format_decimal, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A pie slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    /// Hex fill color
    pub color: String,
    /// Radial offset as a fraction of the radius
    pub explode: f64,
}

impl Slice {
    pub fn new(label: impl Into<String>, value: u64, color: &str) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.to_string(),
            explode: 0.0,
        }
    }

    /// Pull the slice away from the center
    pub fn exploded(mut self, fraction: f64) -> Self {
        self.explode = fraction.max(0.0);
        self
    }
}

/// Pie chart with counter-clockwise slices and percentage labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub config: GraphConfig,
    pub slices: Vec<Slice>,
    /// Angle of the first slice edge in degrees, 0 pointing right
    pub start_angle: f64,
}

/// Angular extent of one slice, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    fn middle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

impl PieChart {
    pub fn new(config: GraphConfig, slices: Vec<Slice>) -> Self {
        Self {
            config,
            slices,
            start_angle: 90.0,
        }
    }

    pub fn with_start_angle(mut self, degrees: f64) -> Self {
        self.start_angle = degrees;
        self
    }

    fn total(&self) -> u64 {
        self.slices.iter().map(|slice| slice.value).sum()
    }

    /// Share of each slice in percent; all zero when the pie is empty
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|slice| bikeshare_common::percentage(slice.value, total))
            .collect()
    }

    /// Slice extents in drawing order
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut start = self.start_angle;
        self.slices
            .iter()
            .map(|slice| {
                let sweep = slice.value as f64 / total as f64 * 360.0;
                let wedge = Wedge {
                    start,
                    end: start + sweep,
                };
                start += sweep;
                wedge
            })
            .collect()
    }
}

/// Point on a circle in pixel space, y growing downwards
fn polar(center: (f64, f64), radius: f64, degrees: f64) -> (i32, i32) {
    let rad = degrees * PI / 180.0;
    (
        (center.0 + radius * rad.cos()).round() as i32,
        (center.1 - radius * rad.sin()).round() as i32,
    )
}

impl GraphRenderer for PieChart {
    fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&self.get_background_color())?;

        let style = &self.config.style;
        let area = root.titled(
            &self.config.title,
            (style.title_font.family.as_str(), style.title_font.size),
        )?;
        let (width, height) = area.dim_in_pixel();
        let center = (width as f64 / 2.0, height as f64 / 2.0);
        let radius = f64::from(width.min(height)) * 0.35;

        let label_font = (style.label_font.family.as_str(), style.label_font.size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for ((slice, wedge), share) in self
            .slices
            .iter()
            .zip(self.wedges())
            .zip(self.percentages())
        {
            let offset = polar((0.0, 0.0), radius * slice.explode, wedge.middle());
            let origin = (center.0 + offset.0 as f64, center.1 + offset.1 as f64);

            let mut outline = vec![(origin.0.round() as i32, origin.1.round() as i32)];
            let mut angle = wedge.start;
            while angle < wedge.end {
                outline.push(polar(origin, radius, angle));
                angle += 1.0;
            }
            outline.push(polar(origin, radius, wedge.end));

            area.draw(&Polygon::new(
                outline.clone(),
                parse_color(&slice.color).filled(),
            ))?;
            outline.push(outline[0]);
            area.draw(&PathElement::new(outline, WHITE.stroke_width(2)))?;

            area.draw(&Text::new(
                format!("{}%", format_decimal(share, 1)),
                polar(origin, radius * 0.6, wedge.middle()),
                label_font.clone(),
            ))?;
            area.draw(&Text::new(
                slice.label.clone(),
                polar(origin, radius * 1.15, wedge.middle()),
                label_font.clone(),
            ))?;
        }

        tracing::debug!(title = %self.config.title, slices = self.slices.len(), "Drew pie chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_chart(casual: u64, registered: u64) -> PieChart {
        PieChart::new(
            GraphConfig::default(),
            vec![
                Slice::new("Unregistered", casual, "#FF9999").exploded(0.1),
                Slice::new("Registered", registered, "#66B2FF"),
            ],
        )
    }

    #[test]
    fn test_percentages() {
        let chart = split_chart(100, 550);
        let shares = chart.percentages();
        assert_eq!(shares.len(), 2);
        assert!((shares[0] - 15.384615).abs() < 1e-4);
        assert!((shares[0] + shares[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_wedges_cover_full_circle() {
        let chart = split_chart(1, 3);
        let wedges = chart.wedges();
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].start, 90.0);
        assert!((wedges[0].end - 180.0).abs() < 1e-9);
        assert!((wedges[1].end - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pie_has_no_wedges() {
        let chart = split_chart(0, 0);
        assert!(chart.wedges().is_empty());
        assert_eq!(chart.percentages(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_explode_is_not_negative() {
        let slice = Slice::new("x", 1, "#000000").exploded(-0.5);
        assert_eq!(slice.explode, 0.0);
    }

    #[test]
    fn test_polar_points() {
        assert_eq!(polar((100.0, 100.0), 10.0, 0.0), (110, 100));
        assert_eq!(polar((100.0, 100.0), 10.0, 90.0), (100, 90));
        assert_eq!(polar((100.0, 100.0), 10.0, 180.0), (90, 100));
    }
}
