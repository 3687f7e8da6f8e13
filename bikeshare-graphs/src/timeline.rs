//! Daily time series drawn as a line with point markers

use crate::{parse_color, GraphConfig, GraphRenderer};
use bikeshare_common::Result;
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

/// One day on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// Scatter points joined by a line, ordered by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTimelineChart {
    pub config: GraphConfig,
    pub points: Vec<TimelinePoint>,
    /// Hex color of the point markers
    pub point_color: String,
    /// Hex color of the connecting line
    pub line_color: String,
}

impl DailyTimelineChart {
    pub fn new(config: GraphConfig, mut points: Vec<TimelinePoint>) -> Self {
        points.sort_by_key(|point| point.date);
        Self {
            config,
            points,
            point_color: "#64B5F6".to_string(),
            line_color: "#1976D2".to_string(),
        }
    }

    pub fn with_colors(mut self, point_color: &str, line_color: &str) -> Self {
        self.point_color = point_color.to_string();
        self.line_color = line_color.to_string();
        self
    }

    /// First date on the axis, `None` for an empty series
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|point| point.date)
    }

    /// Points as (day offset from the first date, value)
    fn plot_data(&self) -> Vec<(i64, f64)> {
        let Some(first) = self.first_date() else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|point| ((point.date - first).num_days(), point.value as f64))
            .collect()
    }

    fn max_value(&self) -> f64 {
        let max = self.points.iter().map(|point| point.value).max().unwrap_or(0);
        if max == 0 {
            1.0
        } else {
            max as f64 * 1.1
        }
    }
}

impl GraphRenderer for DailyTimelineChart {
    fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&self.get_background_color())?;

        let config = &self.config;
        let style = &config.style;
        let plot_data = self.plot_data();
        let first = self.first_date().unwrap_or_default();
        // A single day still needs a non-empty x range
        let max_x = plot_data.last().map(|(x, _)| *x).unwrap_or(0).max(1);

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let mut chart = ChartBuilder::on(root)
            .caption(&config.title, title_font)
            .margin(style.margins.top)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(0i64..max_x, 0f64..self.max_value())?;

        let date_formatter = |offset: &i64| (first + Duration::days(*offset)).format("%Y-%m-%d").to_string();
        let axis_font = (style.axis_font.family.as_str(), style.axis_font.size);

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(8)
            .x_label_formatter(&date_formatter)
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style(axis_font)
            .light_line_style(self.get_grid_color().mix(0.4))
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""));
        if !style.grid.show_y {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let line_color = parse_color(&self.line_color);
        let point_color = parse_color(&self.point_color);

        chart.draw_series(LineSeries::new(
            plot_data.iter().copied(),
            line_color.stroke_width(2),
        ))?;
        chart.draw_series(
            plot_data
                .iter()
                .map(|point| Circle::new(*point, 3, point_color.filled())),
        )?;

        tracing::debug!(title = %config.title, points = plot_data.len(), "Drew timeline chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_points_are_sorted_by_date() {
        let chart = DailyTimelineChart::new(
            GraphConfig::default(),
            vec![
                TimelinePoint { date: date(2011, 1, 3), value: 5 },
                TimelinePoint { date: date(2011, 1, 1), value: 9 },
            ],
        );
        assert_eq!(chart.first_date(), Some(date(2011, 1, 1)));
        assert_eq!(chart.plot_data(), vec![(0, 9.0), (2, 5.0)]);
    }

    #[test]
    fn test_empty_series() {
        let chart = DailyTimelineChart::new(GraphConfig::default(), vec![]);
        assert_eq!(chart.first_date(), None);
        assert!(chart.plot_data().is_empty());
        assert_eq!(chart.max_value(), 1.0);
    }

    #[test]
    fn test_default_and_custom_colors() {
        let chart = DailyTimelineChart::new(GraphConfig::default(), vec![]);
        assert_eq!(chart.point_color, "#64B5F6");
        assert_eq!(chart.line_color, "#1976D2");

        let chart = chart.with_colors("#000000", "#FFFFFF");
        assert_eq!(chart.point_color, "#000000");
        assert_eq!(chart.line_color, "#FFFFFF");
    }
}
