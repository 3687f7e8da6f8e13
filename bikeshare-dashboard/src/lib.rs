//! Bike Sharing Dashboard Library
//!
//! Loads the daily and hourly rental datasets, filters them to a date
//! range and turns each render pass into a page of KPIs, charts and text.

pub mod aggregate;
pub mod charts;
pub mod context;
pub mod export;
pub mod filter;
pub mod loader;
pub mod page;
pub mod presenter;
pub mod records;
pub mod selection;
pub mod view;

// Re-export commonly used types
pub use aggregate::{
    compute_daily_max, compute_hourly_totals, compute_kpis, compute_monthly_totals,
    compute_registered_vs_casual_split, compute_seasonal_totals, compute_yearly_trend,
    HourlyTotals, Kpis, MonthlyTotals, RiderSplit, RiderType, SeasonalTotals, YearlyTrend,
};
pub use context::DashboardContext;
pub use export::{export_html, export_png, render_html};
pub use filter::filter_by_date_range;
pub use loader::{load_datasets, Datasets, DAILY_DATA_PATH, HOURLY_DATA_PATH};
pub use page::{Kpi, Page, PassOutcome, Section, SelectionStatus, Sidebar};
pub use presenter::{presenter_for, JsonPresenter, OutputFormat, Presenter, TextPresenter};
pub use records::{DailyRecord, Dated, HourlyRecord, Month, Season};
pub use selection::{DateRange, SelectionError};
pub use view::ReportingView;
