//! Date range filtering over date-sorted records

use crate::records::Dated;
use crate::selection::DateRange;

/// Rows with `range.start <= date <= range.end`.
///
/// `records` must be sorted ascending by date, which the loader guarantees;
/// the result is a borrowed sub-slice found by binary search.
pub fn filter_by_date_range<'a, T: Dated>(records: &'a [T], range: &DateRange) -> &'a [T] {
    debug_assert!(
        records.windows(2).all(|pair| pair[0].date() <= pair[1].date()),
        "records must be sorted by date"
    );

    let lower = records.partition_point(|record| record.date() < range.start);
    let upper = records.partition_point(|record| record.date() <= range.end);
    &records[lower..upper.max(lower)]
}
