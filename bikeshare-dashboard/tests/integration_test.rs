//! End-to-end tests from CSV files on disk to rendered pages

use bikeshare_config::{GraphSettings, OutputConfig};
use bikeshare_dashboard::{
    presenter_for, render_html, DashboardContext, OutputFormat, PassOutcome, ReportingView,
    SelectionStatus,
};
use bikeshare_graphs::Chart;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DAILY_HEADER: &str = "dteday,season,year,month,holiday,casual,registered,count_cr";
const HOURLY_HEADER: &str = "dteday,hours,count_cr";

fn write_fixture(daily_rows: &[&str], hourly_rows: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("dashboard");
    fs::create_dir_all(&data_dir).unwrap();

    let mut daily = String::from(DAILY_HEADER);
    for row in daily_rows {
        daily.push('\n');
        daily.push_str(row);
    }
    fs::write(data_dir.join("day_cleaned.csv"), daily).unwrap();

    let mut hourly = String::from(HOURLY_HEADER);
    for row in hourly_rows {
        hourly.push('\n');
        hourly.push_str(row);
    }
    fs::write(data_dir.join("hour_cleaned.csv"), hourly).unwrap();

    dir
}

fn small_fixture() -> TempDir {
    write_fixture(
        &[
            // Out of order on purpose
            "2012-07-01,Summer,2012,Jul,0,300,900,1200",
            "2011-01-01,Spring,2011,Jan,0,100,350,450",
            "2011-01-02,Spring,2011,Jan,0,50,150,200",
        ],
        &[
            "2011-01-01,0,20",
            "2011-01-01,17,300",
            "2011-01-02,4,5",
            "2012-07-01,17,1200",
        ],
    )
}

fn load(dir: &Path) -> DashboardContext {
    DashboardContext::load(dir).expect("datasets load")
}

#[test]
fn test_two_day_selection_kpis() {
    let dir = small_fixture();
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());

    let outcome = view.render_input("2011-01-01 2011-01-02");
    let page = outcome.page().expect("rendered page");

    let values: Vec<_> = page.kpis.iter().map(|kpi| kpi.value.as_str()).collect();
    assert_eq!(values, vec!["650", "325.00", "500", "150"]);
    assert!(page.sections[3].text[0].starts_with("Most riders are registered customers"));
    assert_eq!(
        page.sidebar.status,
        SelectionStatus::Confirmed("Date range selected from 2011-01-01 to 2011-01-02.".to_string())
    );
}

#[test]
fn test_bounds_come_from_daily_data() {
    let dir = small_fixture();
    let context = load(dir.path());
    let bounds = context.bounds().expect("bounds");
    assert_eq!(bounds.to_string(), "2011-01-01 to 2012-07-01");
    assert_eq!(context.initial_selection(), Some(bounds));
}

#[test]
fn test_range_without_rows_is_empty_result() {
    let dir = small_fixture();
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());

    let outcome = view.render_input("2011-05-01 2011-05-31");
    assert!(matches!(outcome, PassOutcome::EmptyFilterResult { .. }));
}

#[test]
fn test_range_without_hourly_rows_is_empty_result() {
    let dir = write_fixture(
        &[
            "2011-01-01,Spring,2011,Jan,0,100,350,450",
            "2012-01-01,Spring,2012,Jan,0,80,300,380",
        ],
        &["2012-01-01,8,380"],
    );
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());

    match view.render_input("2011-01-01 2011-01-01") {
        PassOutcome::EmptyFilterResult { sidebar, .. } => {
            assert!(matches!(sidebar.status, SelectionStatus::Confirmed(_)));
        }
        other => panic!("expected an empty result, got {other:?}"),
    }
}

#[test]
fn test_seasonal_panel_keeps_display_order() {
    let dir = write_fixture(
        &[
            "2011-03-01,Spring,2011,Mar,0,40,60,100",
            "2011-06-01,Summer,2011,Jun,0,100,300,400",
            "2011-09-01,Fall,2011,Sep,0,50,150,200",
            "2011-12-01,Winter,2011,Dec,0,50,100,150",
            "2012-06-01,Summer,2012,Jun,0,100,100,200",
        ],
        &["2011-06-01,8,40", "2011-09-01,18,60"],
    );
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());

    let outcome = view.render_input("2011-03-01 to 2011-12-01");
    let page = outcome.page().expect("rendered page");
    let seasons = &page.sections[2];

    let Some(Chart::Bar(chart)) = &seasons.chart else {
        panic!("expected a bar chart for seasons");
    };
    let bars: Vec<_> = chart.bars.iter().map(|bar| (bar.label.as_str(), bar.value)).collect();
    assert_eq!(
        bars,
        vec![("Spring", 100), ("Summer", 400), ("Fall", 200), ("Winter", 150)]
    );
    let highlighted: Vec<_> = chart.highlighted().map(|bar| bar.label.as_str()).collect();
    assert_eq!(highlighted, vec!["Summer"]);
    assert_eq!(
        seasons.text[0],
        "The Summer season recorded the highest number of bike rentals."
    );
}

#[test]
fn test_repeated_passes_are_identical() {
    let dir = small_fixture();
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());

    let first = view.render_input("2011-01-01 2012-07-01");
    let second = view.render_input("2011-01-01 2012-07-01");
    assert_eq!(first, second);
}

#[test]
fn test_malformed_row_names_row_and_column() {
    let dir = write_fixture(
        &[
            "2011-01-01,Spring,2011,Jan,0,1,2,3",
            "2011-01-02,Monsoon,2011,Jan,0,1,2,3",
        ],
        &["2011-01-01,0,1"],
    );
    let err = DashboardContext::load(dir.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Monsoon"), "{message}");
    assert!(message.contains("row 2"), "{message}");
}

#[test]
fn test_missing_dataset_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = DashboardContext::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("day_cleaned.csv"));
}

#[test]
fn test_json_output_of_a_pass() {
    let dir = small_fixture();
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());
    let outcome = view.render_input("2011-01-01");

    let presenter = presenter_for(OutputFormat::Json, &OutputConfig::default());
    let mut buffer = Vec::new();
    presenter.present(&outcome, &mut buffer).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["outcome"], "missing_date_selection");
    assert_eq!(value["sidebar"]["bounds"]["start"], "2011-01-01");
}

#[test]
fn test_html_for_empty_result() {
    let dir = small_fixture();
    let context = load(dir.path());
    let view = ReportingView::new(&context, GraphSettings::default());

    let html = render_html(&view.render_input("2011-05-01 2011-05-31")).unwrap();
    assert!(html.contains("Date range selected from 2011-05-01 to 2011-05-31."));
    assert!(!html.contains("<svg"));
}
