//! Chart models and rendering for the bike sharing dashboard

pub mod bar_chart;
pub mod pie_chart;
pub mod renderer;
pub mod timeline;
pub mod types;

pub use bar_chart::{Bar, CategoryBarChart};
pub use pie_chart::{PieChart, Slice, Wedge};
pub use renderer::{parse_color, GraphRenderer};
pub use timeline::{DailyTimelineChart, TimelinePoint};
pub use types::*;

use bikeshare_common::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Any chart a dashboard section can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Bar(CategoryBarChart),
    Pie(PieChart),
    Timeline(DailyTimelineChart),
}

impl Chart {
    pub fn config(&self) -> &GraphConfig {
        match self {
            Chart::Bar(chart) => chart.config(),
            Chart::Pie(chart) => chart.config(),
            Chart::Timeline(chart) => chart.config(),
        }
    }

    pub fn title(&self) -> &str {
        &self.config().title
    }

    /// Render to an in-memory SVG document
    pub fn render_to_svg(&self) -> Result<String> {
        match self {
            Chart::Bar(chart) => chart.render_to_svg(),
            Chart::Pie(chart) => chart.render_to_svg(),
            Chart::Timeline(chart) => chart.render_to_svg(),
        }
    }

    /// Render to a PNG file
    pub fn render_to_file(&self, path: &Path) -> Result<()> {
        match self {
            Chart::Bar(chart) => chart.render_to_file(path),
            Chart::Pie(chart) => chart.render_to_file(path),
            Chart::Timeline(chart) => chart.render_to_file(path),
        }
    }
}

impl From<CategoryBarChart> for Chart {
    fn from(chart: CategoryBarChart) -> Self {
        Chart::Bar(chart)
    }
}

impl From<PieChart> for Chart {
    fn from(chart: PieChart) -> Self {
        Chart::Pie(chart)
    }
}

impl From<DailyTimelineChart> for Chart {
    fn from(chart: DailyTimelineChart) -> Self {
        Chart::Timeline(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_title_and_kind_tag() {
        let config = GraphConfig {
            title: "Rentals by Season".to_string(),
            ..GraphConfig::default()
        };
        let chart: Chart = CategoryBarChart::new(config, vec![Bar::new("Summer", 3, "#FF5733")]).into();
        assert_eq!(chart.title(), "Rentals by Season");

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["bars"][0]["label"], "Summer");
    }
}
