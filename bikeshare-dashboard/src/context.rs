//! Read-only dataset context shared by every render pass

use crate::loader::{load_datasets, Datasets};
use crate::records::{DailyRecord, Dated, HourlyRecord};
use crate::selection::DateRange;
use bikeshare_common::Result;
use std::path::Path;
use tracing::info;

/// Both datasets plus the date bounds of the daily data.
///
/// Built once at startup and never mutated afterwards; passes borrow it.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    datasets: Datasets,
    bounds: Option<DateRange>,
}

impl DashboardContext {
    /// Load the datasets below `data_root` and build the context
    pub fn load(data_root: &Path) -> Result<Self> {
        let context = Self::new(load_datasets(data_root)?);
        match context.bounds {
            Some(bounds) => info!(%bounds, "Dashboard context ready"),
            None => info!("Dashboard context ready with an empty daily dataset"),
        }
        Ok(context)
    }

    /// Build a context from datasets; rows are sorted by date if needed
    pub fn new(mut datasets: Datasets) -> Self {
        datasets.daily.sort_by_key(|record| record.date());
        datasets.hourly.sort_by_key(|record| record.date());

        let bounds = match (datasets.daily.first(), datasets.daily.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                start: first.date,
                end: last.date,
            }),
            _ => None,
        };

        Self { datasets, bounds }
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.datasets.daily
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.datasets.hourly
    }

    /// Earliest and latest day of the daily dataset
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// The selection a fresh session starts with: the full bounds
    pub fn initial_selection(&self) -> Option<DateRange> {
        self.bounds
    }
}
