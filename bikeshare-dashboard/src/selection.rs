//! Date range selection parsed from a line of user input

use crate::records::parse_iso_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed interval of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Reasons a selection cannot be used for a render pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please pick both the start and the end date of the range ({found} of 2 given)")]
    Incomplete { found: usize },

    #[error("A date range has exactly two endpoints, got {found}")]
    TooManyDates { found: usize },

    #[error("'{token}' is not a date, use the YYYY-MM-DD format")]
    InvalidDate { token: String },

    #[error("The start date {start} is after the end date {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl FromStr for DateRange {
    type Err = SelectionError;

    /// Parse up to two ISO dates separated by whitespace, a comma or `to`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case("to"))
            .collect();

        let dates = tokens
            .iter()
            .map(|token| {
                parse_iso_date(token).ok_or_else(|| SelectionError::InvalidDate {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match dates.as_slice() {
            [start, end] => DateRange::new(*start, *end),
            [] | [_] => Err(SelectionError::Incomplete { found: dates.len() }),
            _ => Err(SelectionError::TooManyDates { found: dates.len() }),
        }
    }
}
