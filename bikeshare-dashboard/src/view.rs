//! The reporting view: one render pass per date selection

use crate::aggregate::{
    compute_daily_max, compute_hourly_totals, compute_kpis, compute_monthly_totals,
    compute_registered_vs_casual_split, compute_seasonal_totals, compute_yearly_trend, HourlyTotals,
    Kpis, MonthlyTotals, RiderSplit, SeasonalTotals, YearlyTrend, TREND_YEARS,
};
use crate::charts::ChartFactory;
use crate::context::DashboardContext;
use crate::filter::filter_by_date_range;
use crate::page::{Kpi, PassOutcome, Page, Section, SelectionStatus, Sidebar, PAGE_TITLE};
use crate::records::{DailyRecord, HourlyRecord};
use crate::selection::{DateRange, SelectionError};
use bikeshare_common::{format_decimal, format_thousands, Result};
use bikeshare_config::GraphSettings;
use tracing::{debug, error, info, instrument, warn};

pub const EMPTY_RESULT_NOTICE: &str =
    "No rentals recorded in the selected range. Pick another end date to show the charts.";
pub const COMPUTATION_FAILED_MESSAGE: &str =
    "Something went wrong while building the dashboard. Please confirm your date selection.";

/// Renders dashboard pages from a shared read-only context
#[derive(Debug, Clone)]
pub struct ReportingView<'a> {
    context: &'a DashboardContext,
    charts: ChartFactory,
}

impl<'a> ReportingView<'a> {
    pub fn new(context: &'a DashboardContext, graph: GraphSettings) -> Self {
        Self {
            context,
            charts: ChartFactory::new(graph),
        }
    }

    /// Parse a line of user input and run a pass over it
    pub fn render_input(&self, input: &str) -> PassOutcome {
        match input.parse::<DateRange>() {
            Ok(range) => self.render_range(&range),
            Err(err) => self.reject_selection(&err),
        }
    }

    /// Warn about an unusable selection and skip rendering
    pub fn reject_selection(&self, err: &SelectionError) -> PassOutcome {
        info!(reason = %err, "Date selection incomplete, skipping render");
        PassOutcome::MissingDateSelection {
            sidebar: self.sidebar(SelectionStatus::Warning(err.to_string())),
        }
    }

    /// Filter both datasets to `range` and build the page
    #[instrument(skip_all, fields(range = %range))]
    pub fn render_range(&self, range: &DateRange) -> PassOutcome {
        let sidebar = self.sidebar(SelectionStatus::confirmed(range));

        let daily = filter_by_date_range(self.context.daily(), range);
        let hourly = filter_by_date_range(self.context.hourly(), range);
        debug!(daily_rows = daily.len(), hourly_rows = hourly.len(), "Filtered datasets");

        if daily.is_empty() || hourly.is_empty() {
            info!("Selected range matches no rows");
            return PassOutcome::EmptyFilterResult {
                sidebar,
                notice: EMPTY_RESULT_NOTICE.to_string(),
            };
        }

        match self.build_page(daily, hourly, sidebar.clone()) {
            Ok(page) => PassOutcome::Rendered { page },
            Err(err) => {
                error!(error = %err, "Render pass failed");
                PassOutcome::ComputationFailed {
                    sidebar,
                    message: COMPUTATION_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    fn sidebar(&self, status: SelectionStatus) -> Sidebar {
        Sidebar::new(self.context.bounds(), status)
    }

    /// Everything below the sidebar; any error discards the whole page
    fn build_page(
        &self,
        daily: &[DailyRecord],
        hourly: &[HourlyRecord],
        sidebar: Sidebar,
    ) -> Result<Page> {
        let kpis = compute_kpis(daily)?;
        let hourly_totals = compute_hourly_totals(hourly)?;
        let seasonal = compute_seasonal_totals(daily)?;
        let split = compute_registered_vs_casual_split(daily);
        let trend = compute_yearly_trend(self.context.daily())?;

        let mut sections = vec![
            Section::new(
                "Maximum Bike Rentals per Day",
                self.charts.daily_max(&compute_daily_max(daily)),
            ),
            self.yearly_section(&trend),
            self.seasonal_section(&seasonal),
            self.split_section(&split),
            self.hourly_section(&hourly_totals),
            self.ranking_section(&hourly_totals),
        ];

        let (first_year, second_year) = TREND_YEARS;
        for year in [first_year, second_year] {
            let monthly = compute_monthly_totals(self.context.daily(), year);
            sections.push(self.monthly_section(year, monthly.as_ref()));
        }

        Ok(Page {
            title: PAGE_TITLE.to_string(),
            sidebar,
            kpis: kpi_strip(&kpis),
            sections,
        })
    }

    fn yearly_section(&self, trend: &YearlyTrend) -> Section {
        let change = match trend.growth_percent() {
            Some(growth) if growth > 0.0 => format!(
                ", an increase of {}% over {}",
                format_decimal(growth, 2),
                trend.first_year
            ),
            Some(growth) if growth < 0.0 => format!(
                ", a decrease of {}% from {}",
                format_decimal(-growth, 2),
                trend.first_year
            ),
            Some(_) => format!(", unchanged from {}", trend.first_year),
            None => String::new(),
        };

        Section::new("Yearly Rental Trend", self.charts.yearly_trend(trend))
            .with_text(format!(
                "General information for {}-{} (does not follow the selected dates).",
                trend.first_year, trend.second_year
            ))
            .with_text(format!(
                "In {}, total bike rentals reached {} units.",
                trend.first_year,
                format_thousands(trend.first_total)
            ))
            .with_text(format!(
                "In {}, total bike rentals reached {} units{}.",
                trend.second_year,
                format_thousands(trend.second_total),
                change
            ))
    }

    fn seasonal_section(&self, seasonal: &SeasonalTotals) -> Section {
        let season = seasonal.highest_season;
        Section::new("Bike Rentals per Season", self.charts.seasonal(seasonal))
            .with_text(format!(
                "The {season} season recorded the highest number of bike rentals."
            ))
            .with_text(format!(
                "Rentals in {season} reached {} units, making it the busiest rental period.",
                format_thousands(seasonal.total_for(season))
            ))
    }

    fn split_section(&self, split: &RiderSplit) -> Section {
        let dominant = split.dominant;
        let minor = split.minor();
        Section::new(
            "Bike Rentals: Unregistered vs Registered",
            self.charts.rider_split(split),
        )
        .with_text(format!(
            "Most riders are {} customers rather than {} customers.",
            dominant.label(),
            minor.label()
        ))
        .with_text(format!(
            "{} riders account for {} rentals, while {} riders account for {}.",
            capitalize(dominant.label()),
            format_thousands(split.total_for(dominant)),
            minor.label(),
            format_thousands(split.total_for(minor))
        ))
        .with_text(format!(
            "This shows a strong preference for the '{}' customer model.",
            dominant.label()
        ))
    }

    fn hourly_section(&self, hourly: &HourlyTotals) -> Section {
        Section::new("Bike Rentals per Hour", self.charts.hourly(hourly))
            .with_text(format!("Rentals peak at {}:00.", hourly.peak_hour))
            .with_text(format!("The fewest rentals happen at {}:00.", hourly.lowest_hour))
    }

    fn ranking_section(&self, hourly: &HourlyTotals) -> Section {
        let mut section = Section::new("Hours Ranked by Rentals", self.charts.hour_ranking(hourly));
        if let Some((hour, total)) = hourly.ranking().first() {
            section = section.with_text(format!(
                "The busiest hour is {hour}:00 with {} rentals.",
                format_thousands(*total)
            ));
        }
        section
    }

    fn monthly_section(&self, year: i32, monthly: Option<&MonthlyTotals>) -> Section {
        let heading = format!("Monthly Bike Rentals in {year}");
        match monthly {
            Some(monthly) => Section::new(heading, self.charts.monthly(monthly))
                .with_text(format!(
                    "The month with the most rentals in {year} is {}.",
                    monthly.max_month
                ))
                .with_text(format!(
                    "The month with the fewest rentals in {year} is {}.",
                    monthly.min_month
                )),
            None => {
                warn!(year, "No daily rows for year");
                Section::note(heading, format!("No data for {year}"))
            }
        }
    }
}

fn kpi_strip(kpis: &Kpis) -> Vec<Kpi> {
    [
        ("Total Bike Rentals", format_thousands(kpis.total_rentals)),
        ("Avg Rentals/Day", format_decimal(kpis.avg_rentals_per_day, 2)),
        ("Total Registered Users", format_thousands(kpis.total_registered)),
        ("Total Casual Users", format_thousands(kpis.total_casual)),
    ]
    .into_iter()
    .map(|(label, value)| Kpi {
        label: label.to_string(),
        value,
    })
    .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Datasets;
    use crate::records::{Month, Season};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(date: NaiveDate, season: Season, month: Month, casual: u64, registered: u64) -> DailyRecord {
        DailyRecord {
            date,
            season,
            year: chrono::Datelike::year(&date),
            month,
            casual,
            registered,
            count: casual + registered,
        }
    }

    fn hourly(date: NaiveDate, hour: u8, count: u64) -> HourlyRecord {
        HourlyRecord { date, hour, count }
    }

    fn context() -> DashboardContext {
        DashboardContext::new(Datasets {
            daily: vec![
                daily(date(2011, 1, 1), Season::Spring, Month::Jan, 100, 350),
                daily(date(2011, 1, 2), Season::Spring, Month::Jan, 50, 150),
                daily(date(2012, 7, 1), Season::Summer, Month::Jul, 300, 900),
            ],
            hourly: vec![
                hourly(date(2011, 1, 1), 0, 20),
                hourly(date(2011, 1, 1), 17, 300),
                hourly(date(2011, 1, 2), 4, 5),
                hourly(date(2012, 7, 1), 17, 1200),
            ],
        })
    }

    #[test]
    fn test_rendered_page_layout() {
        let context = context();
        let view = ReportingView::new(&context, GraphSettings::default());
        let outcome = view.render_input("2011-01-01 2011-01-02");

        let page = outcome.page().expect("page");
        assert_eq!(page.title, PAGE_TITLE);
        assert_eq!(page.kpis[0].value, "650");
        assert_eq!(page.kpis[1].value, "325.00");
        assert_eq!(page.kpis[2].value, "500");
        assert_eq!(page.kpis[3].value, "150");

        let headings: Vec<_> = page.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Maximum Bike Rentals per Day",
                "Yearly Rental Trend",
                "Bike Rentals per Season",
                "Bike Rentals: Unregistered vs Registered",
                "Bike Rentals per Hour",
                "Hours Ranked by Rentals",
                "Monthly Bike Rentals in 2011",
                "Monthly Bike Rentals in 2012",
            ]
        );
        assert!(page.sections.iter().all(|s| s.chart.is_some()));
    }

    #[test]
    fn test_text_references_computed_values() {
        let context = context();
        let view = ReportingView::new(&context, GraphSettings::default());
        let outcome = view.render_input("2011-01-01 to 2011-01-02");
        let page = outcome.page().expect("page");

        assert!(page.sections[3].text[0].contains("registered customers rather than casual"));
        assert_eq!(page.sections[4].text[0], "Rentals peak at 17:00.");
        assert_eq!(page.sections[4].text[1], "The fewest rentals happen at 4:00.");
        // Yearly trend ignores the selection: 650 in 2011 versus 1,200 in 2012
        assert!(page.sections[1].text[2].contains("1,200"));
        assert!(page.sections[1].text[2].contains("increase of 84.62%"));
    }

    #[test]
    fn test_missing_selection() {
        let context = context();
        let view = ReportingView::new(&context, GraphSettings::default());
        let outcome = view.render_input("2011-01-01");
        match &outcome {
            PassOutcome::MissingDateSelection { sidebar } => {
                assert!(matches!(sidebar.status, SelectionStatus::Warning(_)));
                assert_eq!(sidebar.bounds, context.bounds());
            }
            other => panic!("expected missing selection, got {other:?}"),
        }
    }

    #[test]
    fn test_reversed_selection_is_a_warning() {
        let context = context();
        let view = ReportingView::new(&context, GraphSettings::default());
        let outcome = view.render_input("2011-01-02 2011-01-01");
        assert_eq!(outcome.kind(), "missing_date_selection");
    }

    #[test]
    fn test_empty_range() {
        let context = context();
        let view = ReportingView::new(&context, GraphSettings::default());
        let outcome = view.render_input("2011-03-01 2011-03-31");
        match outcome {
            PassOutcome::EmptyFilterResult { notice, sidebar } => {
                assert_eq!(notice, EMPTY_RESULT_NOTICE);
                assert!(matches!(sidebar.status, SelectionStatus::Confirmed(_)));
            }
            other => panic!("expected empty result, got {other:?}"),
        }
    }

    #[test]
    fn test_range_with_daily_but_no_hourly_rows() {
        let context = DashboardContext::new(Datasets {
            daily: vec![
                daily(date(2011, 1, 1), Season::Spring, Month::Jan, 100, 350),
                daily(date(2012, 1, 1), Season::Spring, Month::Jan, 80, 300),
            ],
            hourly: vec![hourly(date(2012, 1, 1), 8, 380)],
        });
        let view = ReportingView::new(&context, GraphSettings::default());
        match view.render_input("2011-01-01 2011-01-01") {
            PassOutcome::EmptyFilterResult { notice, .. } => assert_eq!(notice, EMPTY_RESULT_NOTICE),
            other => panic!("expected empty result, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_trend_year_fails_the_pass() {
        let context = DashboardContext::new(Datasets {
            daily: vec![daily(date(2011, 1, 1), Season::Spring, Month::Jan, 1, 2)],
            hourly: vec![hourly(date(2011, 1, 1), 8, 3)],
        });
        let view = ReportingView::new(&context, GraphSettings::default());
        match view.render_input("2011-01-01 2011-01-01") {
            PassOutcome::ComputationFailed { message, .. } => {
                assert_eq!(message, COMPUTATION_FAILED_MESSAGE);
            }
            other => panic!("expected computation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_monthly_section_without_rows() {
        let context = context();
        let view = ReportingView::new(&context, GraphSettings::default());
        let section = view.monthly_section(2013, None);
        assert_eq!(section.heading, "Monthly Bike Rentals in 2013");
        assert!(section.chart.is_none());
        assert_eq!(section.text, vec!["No data for 2013"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("registered"), "Registered");
        assert_eq!(capitalize(""), "");
    }
}
