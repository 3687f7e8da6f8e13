//! Dataset loading from the cleaned CSV files

use crate::records::{parse_iso_date, DailyRecord, Dated, HourlyRecord, Month, Season};
use bikeshare_common::{with_context, DashboardError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Daily dataset, relative to the data root
pub const DAILY_DATA_PATH: &str = "dashboard/day_cleaned.csv";

/// Hourly dataset, relative to the data root
pub const HOURLY_DATA_PATH: &str = "dashboard/hour_cleaned.csv";

#[derive(Debug, Deserialize)]
struct DailyRow {
    dteday: String,
    season: String,
    year: i32,
    month: String,
    casual: u64,
    registered: u64,
    count_cr: u64,
}

#[derive(Debug, Deserialize)]
struct HourlyRow {
    dteday: String,
    hours: u8,
    count_cr: u64,
}

/// Both datasets, sorted ascending by date
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

/// Read both datasets from their fixed paths under `data_root`
pub fn load_datasets(data_root: &Path) -> Result<Datasets> {
    let daily_path = data_root.join(DAILY_DATA_PATH);
    let hourly_path = data_root.join(HOURLY_DATA_PATH);

    let daily = read_daily(open(&daily_path)?, &daily_path.display().to_string())?;
    let hourly = read_hourly(open(&hourly_path)?, &hourly_path.display().to_string())?;

    info!(
        daily_rows = daily.len(),
        hourly_rows = hourly.len(),
        root = %data_root.display(),
        "Loaded datasets"
    );
    Ok(Datasets { daily, hourly })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| with_context!(e, "Failed to open dataset {}", path.display()))
}

fn parse_date(raw: &str, row: usize) -> Result<chrono::NaiveDate> {
    parse_iso_date(raw).ok_or_else(|| {
        DashboardError::data_at(format!("Unparsable date '{raw}' in row {row}"), "dteday", row)
    })
}

/// Parse the daily dataset; `source` names the input in errors and logs
pub fn read_daily<R: Read>(reader: R, source: &str) -> Result<Vec<DailyRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<DailyRow>().enumerate() {
        let line = idx + 1;
        let row = row?;
        let season: Season = row.season.parse().map_err(|_| {
            DashboardError::data_at(format!("Unknown season '{}' in row {line}", row.season), "season", line)
        })?;
        let month: Month = row.month.parse().map_err(|_| {
            DashboardError::data_at(format!("Unknown month '{}' in row {line}", row.month), "month", line)
        })?;

        records.push(DailyRecord {
            date: parse_date(&row.dteday, line)?,
            season,
            year: row.year,
            month,
            casual: row.casual,
            registered: row.registered,
            count: row.count_cr,
        });
    }

    sort_by_date(&mut records);
    debug!(source, rows = records.len(), "Parsed daily dataset");
    Ok(records)
}

/// Parse the hourly dataset; `source` names the input in errors and logs
pub fn read_hourly<R: Read>(reader: R, source: &str) -> Result<Vec<HourlyRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<HourlyRow>().enumerate() {
        let line = idx + 1;
        let row = row?;
        if row.hours > 23 {
            return Err(DashboardError::data_at(
                format!("Hour {} out of range 0-23 in row {line}", row.hours),
                "hours",
                line,
            ));
        }

        records.push(HourlyRecord {
            date: parse_date(&row.dteday, line)?,
            hour: row.hours,
            count: row.count_cr,
        });
    }

    sort_by_date(&mut records);
    debug!(source, rows = records.len(), "Parsed hourly dataset");
    Ok(records)
}

/// Stable sort, so rows sharing a date keep their file order
fn sort_by_date<T: Dated>(records: &mut [T]) {
    records.sort_by_key(|record| record.date());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAILY: &str = "\
dteday,season,year,month,casual,registered,count_cr
2011-01-02,Spring,2011,Jan,50,150,200
2011-01-01,Spring,2011,Jan,100,350,450
";

    const HOURLY: &str = "\
dteday,hours,count_cr
2011-01-02,0,10
2011-01-01,1,20
2011-01-01,0,30
";

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    #[test]
    fn test_read_daily_sorts_by_date() {
        let records = read_daily(DAILY.as_bytes(), "inline").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date(1));
        assert_eq!(records[0].count, 450);
        assert_eq!(records[0].season, Season::Spring);
        assert_eq!(records[0].month, Month::Jan);
        assert_eq!(records[1].date, date(2));
    }

    #[test]
    fn test_read_hourly_sort_is_stable() {
        let records = read_hourly(HOURLY.as_bytes(), "inline").unwrap();
        let order: Vec<_> = records.iter().map(|r| (r.date, r.hour)).collect();
        assert_eq!(order, vec![(date(1), 1), (date(1), 0), (date(2), 0)]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "instant,dteday,hours,temp,count_cr\n1,2011-01-01 00:00:00,5,0.24,16\n";
        let records = read_hourly(csv.as_bytes(), "inline").unwrap();
        assert_eq!(records[0].date, date(1));
        assert_eq!(records[0].hour, 5);
        assert_eq!(records[0].count, 16);
    }

    #[test]
    fn test_unparsable_date_names_row() {
        let csv = "dteday,hours,count_cr\n2011-01-01,0,1\nnot-a-date,1,2\n";
        let err = read_hourly(csv.as_bytes(), "inline").unwrap_err();
        match err {
            DashboardError::Data { column, row, .. } => {
                assert_eq!(column.as_deref(), Some("dteday"));
                assert_eq!(row, Some(2));
            }
            other => panic!("expected data error, got {other:?}"),
        }
    }

    #[test]
    fn test_hour_out_of_range() {
        let csv = "dteday,hours,count_cr\n2011-01-01,24,1\n";
        let err = read_hourly(csv.as_bytes(), "inline").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_unknown_season() {
        let csv = "dteday,season,year,month,casual,registered,count_cr\n2011-01-01,Monsoon,2011,Jan,1,1,2\n";
        let err = read_daily(csv.as_bytes(), "inline").unwrap_err();
        assert!(err.to_string().contains("Monsoon"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "dteday,hours\n2011-01-01,1\n";
        let err = read_hourly(csv.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, DashboardError::Csv(_)));
    }

    #[test]
    fn test_load_datasets_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_datasets(dir.path()).unwrap_err();
        assert!(err.to_string().contains("day_cleaned.csv"));
    }
}
