use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range.
///
/// All range filters in the system compare plain calendar dates; because the
/// wire format is zero-padded `YYYY-MM-DD`, chronological order and
/// lexicographic order of the serialized form coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First through last day of the current month, device-local time.
    /// Default range of the dashboard.
    pub fn current_month() -> Self {
        let today = Local::now().date_naive();
        Self {
            start: first_of_month(today),
            end: last_of_month(today),
        }
    }

    /// First of the current month through today, device-local time.
    /// Default range of the report exporter.
    pub fn month_to_date() -> Self {
        let today = Local::now().date_naive();
        Self {
            start: first_of_month(today),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap();
    first_of_next.pred_opt().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let period = Period::new(d(2024, 3, 1), d(2024, 3, 31));
        assert!(period.contains(d(2024, 3, 1)));
        assert!(period.contains(d(2024, 3, 31)));
        assert!(!period.contains(d(2024, 2, 29)));
        assert!(!period.contains(d(2024, 4, 1)));
    }

    #[test]
    fn last_of_month_handles_february_and_december() {
        assert_eq!(last_of_month(d(2024, 2, 10)), d(2024, 2, 29));
        assert_eq!(last_of_month(d(2023, 2, 10)), d(2023, 2, 28));
        assert_eq!(last_of_month(d(2024, 12, 5)), d(2024, 12, 31));
    }
}
