//! Page model produced by a render pass

use crate::selection::DateRange;
use bikeshare_graphs::Chart;
use serde::Serialize;

pub const PAGE_TITLE: &str = "Bike Sharing Data Dashboard";
pub const SIDEBAR_TITLE: &str = "Interactive Visualization";
pub const SIDEBAR_NOTE: &str = "Charts and figures follow the date range below.";
pub const KPI_HEADING: &str = "Key Performance Indicators";

/// Sidebar status line under the date control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SelectionStatus {
    Confirmed(String),
    Warning(String),
}

impl SelectionStatus {
    pub fn confirmed(range: &DateRange) -> Self {
        SelectionStatus::Confirmed(format!(
            "Date range selected from {} to {}.",
            range.start, range.end
        ))
    }

    pub fn message(&self) -> &str {
        match self {
            SelectionStatus::Confirmed(message) | SelectionStatus::Warning(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub title: String,
    pub note: String,
    /// Earliest and latest selectable day
    pub bounds: Option<DateRange>,
    pub status: SelectionStatus,
}

impl Sidebar {
    pub fn new(bounds: Option<DateRange>, status: SelectionStatus) -> Self {
        Self {
            title: SIDEBAR_TITLE.to_string(),
            note: SIDEBAR_NOTE.to_string(),
            bounds,
            status,
        }
    }
}

/// A labelled headline number, already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
}

/// One panel: subheading, optional chart, then free text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub chart: Option<Chart>,
    pub text: Vec<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>, chart: Chart) -> Self {
        Self {
            heading: heading.into(),
            chart: Some(chart),
            text: Vec::new(),
        }
    }

    /// Section with text only
    pub fn note(heading: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            chart: None,
            text: vec![text.into()],
        }
    }

    pub fn with_text(mut self, line: impl Into<String>) -> Self {
        self.text.push(line.into());
        self
    }
}

/// A fully rendered dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub sidebar: Sidebar,
    pub kpis: Vec<Kpi>,
    pub sections: Vec<Section>,
}

/// Result of one render pass; every variant is terminal for that pass only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PassOutcome {
    Rendered { page: Page },
    MissingDateSelection { sidebar: Sidebar },
    EmptyFilterResult { sidebar: Sidebar, notice: String },
    ComputationFailed { sidebar: Sidebar, message: String },
}

impl PassOutcome {
    pub fn sidebar(&self) -> &Sidebar {
        match self {
            PassOutcome::Rendered { page } => &page.sidebar,
            PassOutcome::MissingDateSelection { sidebar }
            | PassOutcome::EmptyFilterResult { sidebar, .. }
            | PassOutcome::ComputationFailed { sidebar, .. } => sidebar,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            PassOutcome::Rendered { page } => Some(page),
            _ => None,
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            PassOutcome::Rendered { .. } => "rendered",
            PassOutcome::MissingDateSelection { .. } => "missing_date_selection",
            PassOutcome::EmptyFilterResult { .. } => "empty_filter_result",
            PassOutcome::ComputationFailed { .. } => "computation_failed",
        }
    }
}
