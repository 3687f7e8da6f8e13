//! Vertical category bar chart with per-bar colors and annotations

use crate::{parse_color, GraphConfig, GraphRenderer};
use bikeshare_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};

/// A single bar in a category chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    /// Hex fill color
    pub color: String,
    /// Marked bars are emphasised by text presenters too
    pub highlighted: bool,
    /// Text drawn just above the bar
    pub annotation: Option<String>,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: u64, color: &str) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.to_string(),
            highlighted: false,
            annotation: None,
        }
    }

    /// Mark the bar as highlighted
    pub fn highlight(mut self) -> Self {
        self.highlighted = true;
        self
    }

    /// Attach a text annotation
    pub fn annotate(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }
}

/// Bar chart over discrete categories, drawn in the given order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBarChart {
    pub config: GraphConfig,
    pub bars: Vec<Bar>,
}

impl CategoryBarChart {
    pub fn new(config: GraphConfig, bars: Vec<Bar>) -> Self {
        Self { config, bars }
    }

    /// Bars flagged as highlighted
    pub fn highlighted(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(|bar| bar.highlighted)
    }

    /// Upper bound of the value axis, leaving headroom for annotations
    fn value_axis_max(&self) -> f64 {
        let max = self.bars.iter().map(|bar| bar.value).max().unwrap_or(0);
        if max == 0 {
            1.0
        } else {
            max as f64 * 1.15
        }
    }

    fn draw_empty<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let style = &self.config.style;
        let titled = root.titled(
            &self.config.title,
            (style.title_font.family.as_str(), style.title_font.size),
        )?;
        let (width, height) = titled.dim_in_pixel();
        titled.draw(&Text::new(
            "No data",
            (width as i32 / 2, height as i32 / 2),
            (style.label_font.family.as_str(), style.label_font.size)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        Ok(())
    }
}

impl GraphRenderer for CategoryBarChart {
    fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&self.get_background_color())?;
        if self.bars.is_empty() {
            return self.draw_empty(root);
        }

        let config = &self.config;
        let style = &config.style;
        let count = self.bars.len() as u32;
        let labels: Vec<&str> = self.bars.iter().map(|bar| bar.label.as_str()).collect();

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let mut chart = ChartBuilder::on(root)
            .caption(&config.title, title_font)
            .margin(style.margins.top)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d((0u32..count).into_segmented(), 0f64..self.value_axis_max())?;

        let label_formatter = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(idx) => labels
                .get(*idx as usize)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        let axis_font = (style.axis_font.family.as_str(), style.axis_font.size);
        let grid_color = self.get_grid_color();

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(self.bars.len())
            .x_label_formatter(&label_formatter)
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style(axis_font)
            .light_line_style(grid_color.mix(0.4))
            .bold_line_style(grid_color)
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""));
        if !style.grid.show_y {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        chart.draw_series(self.bars.iter().enumerate().map(|(idx, bar)| {
            let idx = idx as u32;
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), bar.value as f64),
                ],
                parse_color(&bar.color).filled(),
            );
            rect.set_margin(0, 0, 6, 6);
            rect
        }))?;

        let annotation_style = (style.label_font.family.as_str(), style.label_font.size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(self.bars.iter().enumerate().filter_map(|(idx, bar)| {
            bar.annotation.as_ref().map(|text| {
                Text::new(
                    text.clone(),
                    (SegmentValue::CenterOf(idx as u32), bar.value as f64),
                    annotation_style.clone(),
                )
            })
        }))?;

        tracing::debug!(title = %config.title, bars = self.bars.len(), "Drew bar chart");
        Ok(())
    }
}
