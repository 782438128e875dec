use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Error type for dataset loading, range validation, and configuration failures.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dataset file could not be opened or its CSV stream could not be read.
    #[error("dataset '{}' could not be loaded: {reason}", .path.display())]
    Load {
        /// File (or `<reader>`) the dataset was read from.
        path: PathBuf,
        /// Underlying failure message.
        reason: String,
    },
    /// The header row lacks one or more required columns.
    #[error("dataset '{}' is missing required columns: {}", .path.display(), .columns.join(", "))]
    MissingColumns {
        /// File (or `<reader>`) the dataset was read from.
        path: PathBuf,
        /// Required column names absent from the header, in declaration order.
        columns: Vec<String>,
    },
    /// A data row could not be typed or did not match the header shape.
    #[error("dataset '{}' line {line} is malformed: {reason}", .path.display())]
    MalformedRow {
        /// File (or `<reader>`) the dataset was read from.
        path: PathBuf,
        /// 1-based file line; the header is line 1.
        line: u64,
        /// Which field failed and why.
        reason: String,
    },
    /// Encoding a report as JSON failed.
    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// `end` precedes `start`.
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },
    /// Unsupported locale or other invalid setting.
    #[error("configuration error: {0}")]
    Configuration(String),
}
