//! Group dated amounts into day, week or month buckets.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    /// ISO weeks, starting Monday.
    Week,
    Month,
}

impl Granularity {
    /// First day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => date - Days::new(u64::from(date.weekday().num_days_from_monday())),
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    fn next_start(self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => start.checked_add_days(Days::new(1)),
            Granularity::Week => start.checked_add_days(Days::new(7)),
            Granularity::Month => start.checked_add_months(Months::new(1)),
        }
    }

    fn label(self, start: NaiveDate) -> String {
        match self {
            Granularity::Day => start.format("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let week = start.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Granularity::Month => start.format("%b %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedAmount {
    pub date: NaiveDate,
    pub amount: f64,
}

impl DatedAmount {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: NaiveDate,
    pub label: String,
    pub count: usize,
    pub total: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("report range ends ({to}) before it starts ({from})")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Bucket `points` between `from` and `to` (both inclusive).
///
/// Every bucket overlapping the range is present, zero-filled when no point
/// falls in it. Points outside the range are ignored.
pub fn bucket(
    points: &[DatedAmount],
    granularity: Granularity,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Bucket>, ReportError> {
    if to < from {
        return Err(ReportError::InvertedRange { from, to });
    }

    let last = granularity.bucket_start(to);
    let mut buckets = Vec::new();
    let mut start = granularity.bucket_start(from);
    loop {
        buckets.push(Bucket {
            start,
            label: granularity.label(start),
            count: 0,
            total: 0.0,
        });
        match granularity.next_start(start) {
            Some(next) if next <= last => start = next,
            _ => break,
        }
    }

    let first = buckets[0].start;
    for point in points.iter().filter(|p| p.date >= from && p.date <= to) {
        let key = granularity.bucket_start(point.date);
        let index = match granularity {
            Granularity::Day => (key - first).num_days() as usize,
            Granularity::Week => ((key - first).num_days() / 7) as usize,
            Granularity::Month => months_between(first, key),
        };
        if let Some(slot) = buckets.get_mut(index) {
            slot.count += 1;
            slot.total += point.amount;
        }
    }

    Ok(buckets)
}

fn months_between(from: NaiveDate, to: NaiveDate) -> usize {
    let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    months.max(0) as usize
}
