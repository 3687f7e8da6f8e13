//! Aggregations over filtered rental records
//!
//! Every function here is pure: it reads a slice of records and returns
//! an owned summary. Extremal lookups break ties in favour of the first
//! candidate in display order (lowest hour, earliest season or month).

use crate::records::{DailyRecord, HourlyRecord, Month, Season};
use bikeshare_common::{ensure, DashboardError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Years the yearly trend compares
pub const TREND_YEARS: (i32, i32) = (2011, 2012);

/// The four headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_rentals: u64,
    pub avg_rentals_per_day: f64,
    pub total_registered: u64,
    pub total_casual: u64,
}

/// Rentals per hour of day, ascending by hour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyTotals {
    pub totals: Vec<(u8, u64)>,
    pub peak_hour: u8,
    pub lowest_hour: u8,
}

impl HourlyTotals {
    pub fn total_for(&self, hour: u8) -> u64 {
        self.totals
            .iter()
            .find(|(h, _)| *h == hour)
            .map(|(_, total)| *total)
            .unwrap_or(0)
    }

    /// Hours sorted by total, busiest first; equal totals keep hour order
    pub fn ranking(&self) -> Vec<(u8, u64)> {
        let mut ranked = self.totals.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Rentals per season in display order; absent seasons count zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalTotals {
    pub totals: Vec<(Season, u64)>,
    pub highest_season: Season,
}

impl SeasonalTotals {
    pub fn total_for(&self, season: Season) -> u64 {
        self.totals
            .iter()
            .find(|(s, _)| *s == season)
            .map(|(_, total)| *total)
            .unwrap_or(0)
    }
}

/// Rentals per month of one year, months with data only, Jan..Dec
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub year: i32,
    pub totals: Vec<(Month, u64)>,
    pub max_month: Month,
    pub min_month: Month,
}

/// Rider category of the registered-vs-casual split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiderType {
    Casual,
    Registered,
}

impl RiderType {
    pub fn label(&self) -> &'static str {
        match self {
            RiderType::Casual => "casual",
            RiderType::Registered => "registered",
        }
    }

    pub fn other(&self) -> RiderType {
        match self {
            RiderType::Casual => RiderType::Registered,
            RiderType::Registered => RiderType::Casual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiderSplit {
    pub casual_total: u64,
    pub registered_total: u64,
    pub dominant: RiderType,
}

impl RiderSplit {
    pub fn total_for(&self, rider: RiderType) -> u64 {
        match rider {
            RiderType::Casual => self.casual_total,
            RiderType::Registered => self.registered_total,
        }
    }

    pub fn minor(&self) -> RiderType {
        self.dominant.other()
    }
}

/// Year-over-year totals over the whole daily dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTrend {
    pub first_year: i32,
    pub first_total: u64,
    pub second_year: i32,
    pub second_total: u64,
}

impl YearlyTrend {
    /// Relative change in percent, `None` when the first year has no rentals
    pub fn growth_percent(&self) -> Option<f64> {
        if self.first_total == 0 {
            return None;
        }
        Some((self.second_total as f64 - self.first_total as f64) / self.first_total as f64 * 100.0)
    }
}

/// First key holding the largest value
fn first_max<K: Copy>(items: impl IntoIterator<Item = (K, u64)>) -> Option<K> {
    let mut best: Option<(K, u64)> = None;
    for (key, value) in items {
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key)
}

/// First key holding the smallest value
fn first_min<K: Copy>(items: impl IntoIterator<Item = (K, u64)>) -> Option<K> {
    let mut best: Option<(K, u64)> = None;
    for (key, value) in items {
        if best.map_or(true, |(_, low)| value < low) {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key)
}

/// Per-day sums of one daily column
fn sum_by_day(daily: &[DailyRecord], column: impl Fn(&DailyRecord) -> u64) -> BTreeMap<NaiveDate, u64> {
    let mut by_day = BTreeMap::new();
    for record in daily {
        *by_day.entry(record.date).or_insert(0) += column(record);
    }
    by_day
}

/// Total, mean per row, and the registered and casual sums
pub fn compute_kpis(daily: &[DailyRecord]) -> Result<Kpis> {
    ensure!(!daily.is_empty(), "Cannot compute KPIs without daily records");

    let total_rentals: u64 = daily.iter().map(|r| r.count).sum();
    let total_registered: u64 = sum_by_day(daily, |r| r.registered).values().sum();
    let total_casual: u64 = sum_by_day(daily, |r| r.casual).values().sum();

    Ok(Kpis {
        total_rentals,
        avg_rentals_per_day: total_rentals as f64 / daily.len() as f64,
        total_registered,
        total_casual,
    })
}

pub fn compute_hourly_totals(hourly: &[HourlyRecord]) -> Result<HourlyTotals> {
    let mut by_hour: BTreeMap<u8, u64> = BTreeMap::new();
    for record in hourly {
        *by_hour.entry(record.hour).or_insert(0) += record.count;
    }

    let totals: Vec<(u8, u64)> = by_hour.into_iter().collect();
    let peak_hour = first_max(totals.iter().copied())
        .ok_or_else(|| DashboardError::data("Cannot find the peak hour without hourly records"))?;
    let lowest_hour = first_min(totals.iter().copied())
        .ok_or_else(|| DashboardError::data("Cannot find the lowest hour without hourly records"))?;

    Ok(HourlyTotals {
        totals,
        peak_hour,
        lowest_hour,
    })
}

pub fn compute_seasonal_totals(daily: &[DailyRecord]) -> Result<SeasonalTotals> {
    let mut by_season: BTreeMap<Season, u64> = BTreeMap::new();
    for record in daily {
        *by_season.entry(record.season).or_insert(0) += record.count;
    }

    let highest_season = first_max(by_season.iter().map(|(season, total)| (*season, *total)))
        .ok_or_else(|| DashboardError::data("Cannot find the busiest season without daily records"))?;
    let totals = Season::ALL
        .into_iter()
        .map(|season| (season, by_season.get(&season).copied().unwrap_or(0)))
        .collect();

    Ok(SeasonalTotals {
        totals,
        highest_season,
    })
}

/// Monthly totals for `year`, `None` when the year has no rows
pub fn compute_monthly_totals(daily: &[DailyRecord], year: i32) -> Option<MonthlyTotals> {
    let mut by_month: BTreeMap<Month, u64> = BTreeMap::new();
    for record in daily.iter().filter(|r| r.year == year) {
        *by_month.entry(record.month).or_insert(0) += record.count;
    }

    let totals: Vec<(Month, u64)> = by_month.into_iter().collect();
    let max_month = first_max(totals.iter().copied())?;
    let min_month = first_min(totals.iter().copied())?;

    Some(MonthlyTotals {
        year,
        totals,
        max_month,
        min_month,
    })
}

/// Casual versus registered totals; ties count as casual
pub fn compute_registered_vs_casual_split(daily: &[DailyRecord]) -> RiderSplit {
    let casual_total: u64 = daily.iter().map(|r| r.casual).sum();
    let registered_total: u64 = daily.iter().map(|r| r.registered).sum();
    let dominant = if registered_total > casual_total {
        RiderType::Registered
    } else {
        RiderType::Casual
    };

    RiderSplit {
        casual_total,
        registered_total,
        dominant,
    }
}

/// Totals for the two trend years over the unfiltered dataset
pub fn compute_yearly_trend(all_daily: &[DailyRecord]) -> Result<YearlyTrend> {
    let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
    for record in all_daily {
        *by_year.entry(record.year).or_insert(0) += record.count;
    }

    let (first_year, second_year) = TREND_YEARS;
    let lookup = |year: i32| {
        by_year
            .get(&year)
            .copied()
            .ok_or_else(|| DashboardError::data(format!("No rentals recorded for {year}")))
    };
    let first_total = lookup(first_year)?;
    let second_total = lookup(second_year)?;

    let extra: Vec<i32> = by_year
        .keys()
        .copied()
        .filter(|year| *year != first_year && *year != second_year)
        .collect();
    if !extra.is_empty() {
        warn!(years = ?extra, "Ignoring years outside the yearly trend");
    }

    Ok(YearlyTrend {
        first_year,
        first_total,
        second_year,
        second_total,
    })
}

/// Highest count per day, ascending by date
pub fn compute_daily_max(daily: &[DailyRecord]) -> Vec<(NaiveDate, u64)> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in daily {
        let entry = by_day.entry(record.date).or_insert(0);
        *entry = (*entry).max(record.count);
    }
    by_day.into_iter().collect()
}
