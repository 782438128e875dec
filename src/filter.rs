//! Date-range selection over loaded records.
//!
//! Bounds are calendar dates. The lower bound is compared against the
//! purchase timestamp from midnight of the start day; the upper bound is
//! compared against the delivery timestamp through the end of the end day.

use std::iter::Copied;
use std::slice;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PendingDeliveryPolicy;
use crate::data::OrderRecord;
use crate::errors::DashboardError;
use crate::timestamps::start_of_day;

/// Closed calendar-date interval with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting an end that precedes the start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if end < start {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First admitted calendar day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last admitted delivery day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Clamp both bounds into `span`.
    ///
    /// A range lying wholly outside `span` collapses onto the nearest edge.
    pub fn clamp_to(&self, span: &DateRange) -> DateRange {
        DateRange {
            start: self.start.clamp(span.start, span.end),
            end: self.end.clamp(span.start, span.end),
        }
    }

    /// Earliest purchase timestamp admitted by this range.
    pub fn lower_bound(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }

    /// Whether `record` satisfies both bounds under `policy`.
    pub fn admits(&self, record: &OrderRecord, policy: PendingDeliveryPolicy) -> bool {
        if record.order_purchase_timestamp < self.lower_bound() {
            return false;
        }
        match record.delivery_date() {
            Some(delivered) => delivered <= self.end,
            None => policy == PendingDeliveryPolicy::Include,
        }
    }
}

/// Records admitted by a range filter, borrowed from the source dataset in
/// their dataset order.
#[derive(Clone, Debug, Default)]
pub struct Selection<'a> {
    records: Vec<&'a OrderRecord>,
}

impl<'a> Selection<'a> {
    /// Selected records in dataset order.
    pub fn iter(&self) -> Copied<slice::Iter<'_, &'a OrderRecord>> {
        self.records.iter().copied()
    }

    /// Number of selected records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the range admitted nothing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'s, 'a> IntoIterator for &'s Selection<'a> {
    type Item = &'a OrderRecord;
    type IntoIter = Copied<slice::Iter<'s, &'a OrderRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Select records purchased on or after `range.start()` and delivered on or
/// before `range.end()`.
///
/// An empty selection is not an error; it is logged and returned as-is.
pub fn filter_range<'a>(
    records: &'a [OrderRecord],
    range: &DateRange,
    policy: PendingDeliveryPolicy,
) -> Selection<'a> {
    let selected: Vec<&OrderRecord> = records
        .iter()
        .filter(|record| range.admits(record, policy))
        .collect();
    if selected.is_empty() {
        warn!(
            start = %range.start,
            end = %range.end,
            total = records.len(),
            "date range selected no records"
        );
    } else {
        debug!(
            start = %range.start,
            end = %range.end,
            selected = selected.len(),
            total = records.len(),
            "filtered records by date range"
        );
    }
    Selection { records: selected }
}
