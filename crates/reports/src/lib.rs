//! `atlas-reports`: aggregation behind the dashboard charts.
//!
//! Pure functions over dated amounts; rendering is left to the UI.

pub mod bucket;

pub use bucket::{Bucket, DatedAmount, Granularity, ReportError, bucket};
