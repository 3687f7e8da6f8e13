//! Chart models for each dashboard panel

use crate::aggregate::{HourlyTotals, MonthlyTotals, RiderSplit, SeasonalTotals, YearlyTrend};
use bikeshare_common::format_thousands;
use bikeshare_config::GraphSettings;
use bikeshare_graphs::{
    Bar, CategoryBarChart, Chart, DailyTimelineChart, GraphConfig, GraphType, PieChart, Slice,
    TimelinePoint,
};
use chrono::NaiveDate;

/// Panel colors
pub mod palette {
    pub const BASE: &str = "#4CAF50";
    pub const SEASON_HIGHEST: &str = "#FF5733";
    pub const HOUR_EXTREME: &str = "#FF3333";
    pub const MONTH_MAX: &str = "#FF3333";
    pub const MONTH_MIN: &str = "#64B5F6";
    pub const YEAR_FIRST: &str = "#4CAF50";
    pub const YEAR_SECOND: &str = "#2196F3";
    pub const CASUAL: &str = "#FF9999";
    pub const REGISTERED: &str = "#66B2FF";
    pub const TIMELINE_POINTS: &str = "#64B5F6";
    pub const TIMELINE_LINE: &str = "#1976D2";
}

/// Builds every panel chart with the user's graph settings applied
#[derive(Debug, Clone)]
pub struct ChartFactory {
    settings: GraphSettings,
}

impl ChartFactory {
    pub fn new(settings: GraphSettings) -> Self {
        Self { settings }
    }

    fn config(&self, graph_type: GraphType, title: &str) -> GraphConfig {
        GraphConfig::from_settings(graph_type, title, &self.settings)
    }

    /// Highest rental count per day, points joined by a trend line
    pub fn daily_max(&self, daily_max: &[(NaiveDate, u64)]) -> Chart {
        let config = self
            .config(GraphType::ScatterLine, "Maximum Bike Rentals per Day")
            .with_axes("Date", "Maximum rentals");
        let points = daily_max
            .iter()
            .map(|(date, value)| TimelinePoint {
                date: *date,
                value: *value,
            })
            .collect();

        DailyTimelineChart::new(config, points)
            .with_colors(palette::TIMELINE_POINTS, palette::TIMELINE_LINE)
            .into()
    }

    pub fn yearly_trend(&self, trend: &YearlyTrend) -> Chart {
        let config = self
            .config(GraphType::Bar, "Yearly Rental Trend")
            .with_axes("Year", "Bikes rented")
            .with_size(self.settings.width.min(800), self.settings.height);
        let bars = vec![
            Bar::new(trend.first_year.to_string(), trend.first_total, palette::YEAR_FIRST)
                .annotate(format_thousands(trend.first_total)),
            Bar::new(trend.second_year.to_string(), trend.second_total, palette::YEAR_SECOND)
                .annotate(format_thousands(trend.second_total)),
        ];
        CategoryBarChart::new(config, bars).into()
    }

    pub fn seasonal(&self, seasonal: &SeasonalTotals) -> Chart {
        let config = self
            .config(GraphType::Bar, "Bike Rentals per Season")
            .with_axes("Season", "Total rentals");
        let bars = seasonal
            .totals
            .iter()
            .map(|(season, total)| {
                if *season == seasonal.highest_season {
                    Bar::new(season.as_str(), *total, palette::SEASON_HIGHEST).highlight()
                } else {
                    Bar::new(season.as_str(), *total, palette::BASE)
                }
            })
            .collect();
        CategoryBarChart::new(config, bars).into()
    }

    pub fn rider_split(&self, split: &RiderSplit) -> Chart {
        let size = self.settings.height;
        let config = self
            .config(GraphType::Pie, "Bike Rentals: Unregistered vs Registered")
            .with_size(size, size);
        let slices = vec![
            Slice::new("Unregistered", split.casual_total, palette::CASUAL).exploded(0.05),
            Slice::new("Registered", split.registered_total, palette::REGISTERED),
        ];
        PieChart::new(config, slices).with_start_angle(90.0).into()
    }

    pub fn hourly(&self, hourly: &HourlyTotals) -> Chart {
        let config = self
            .config(GraphType::Bar, "Bike Rentals per Hour")
            .with_axes("Hour", "Total rentals");
        let bars = hourly
            .totals
            .iter()
            .map(|(hour, total)| {
                let bar = Bar::new(hour.to_string(), *total, palette::BASE);
                if *hour == hourly.peak_hour {
                    Bar {
                        color: palette::HOUR_EXTREME.to_string(),
                        ..bar
                    }
                    .highlight()
                    .annotate(format!("Peak: {total}"))
                } else if *hour == hourly.lowest_hour {
                    Bar {
                        color: palette::HOUR_EXTREME.to_string(),
                        ..bar
                    }
                    .highlight()
                    .annotate(format!("Lowest: {total}"))
                } else {
                    bar
                }
            })
            .collect();
        CategoryBarChart::new(config, bars).into()
    }

    /// Hours ordered busiest first
    pub fn hour_ranking(&self, hourly: &HourlyTotals) -> Chart {
        let config = self
            .config(GraphType::Bar, "Hours Ranked by Rentals")
            .with_axes("Hour", "Total rentals");
        let bars = hourly
            .ranking()
            .into_iter()
            .enumerate()
            .map(|(rank, (hour, total))| {
                let label = format!("{hour}:00");
                if rank == 0 {
                    Bar::new(label, total, palette::HOUR_EXTREME).highlight()
                } else {
                    Bar::new(label, total, palette::BASE)
                }
            })
            .collect();
        CategoryBarChart::new(config, bars).into()
    }

    pub fn monthly(&self, monthly: &MonthlyTotals) -> Chart {
        let title = format!("Monthly Bike Rentals in {}", monthly.year);
        let config = self
            .config(GraphType::Bar, &title)
            .with_axes("Month", "Total rentals");
        let bars = monthly
            .totals
            .iter()
            .map(|(month, total)| {
                if *month == monthly.max_month {
                    Bar::new(month.as_str(), *total, palette::MONTH_MAX).highlight()
                } else if *month == monthly.min_month {
                    Bar::new(month.as_str(), *total, palette::MONTH_MIN).highlight()
                } else {
                    Bar::new(month.as_str(), *total, palette::BASE)
                }
            })
            .collect();
        CategoryBarChart::new(config, bars).into()
    }
}
