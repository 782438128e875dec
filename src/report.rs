//! One render pass worth of derived data.
//!
//! `DashboardReport` is the only thing the presentation layer reads. Building
//! one resolves the date range, filters the dataset, and runs every
//! aggregation; the dataset itself is only borrowed.

use serde::Serialize;
use tracing::{debug, info};

use crate::aggregations::{
    category_totals, customers_by_city, customers_by_score, customers_by_state, daily_orders,
    fill_calendar_gaps,
};
use crate::config::{CategoryMetric, DashboardConfig};
use crate::currency::format_currency;
use crate::data::{CategoryTotal, CustomerCount, DailyOrders};
use crate::errors::DashboardError;
use crate::filter::{DateRange, filter_range};
use crate::loader::Dataset;
use crate::metrics::SummaryMetrics;
use crate::types::{CityName, CurrencyCode, ReviewScore, StateCode};

/// Derived tables and headline metrics for one date range.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Effective range after clamping; `None` only for an empty dataset with
    /// no requested range.
    pub range: Option<DateRange>,
    /// Records admitted by the range filter.
    pub record_count: usize,
    /// Measure used for `category_totals`.
    pub category_metric: CategoryMetric,
    /// Orders and revenue per purchase day, ascending.
    pub daily_orders: Vec<DailyOrders>,
    /// Category measures, largest first.
    pub category_totals: Vec<CategoryTotal>,
    /// Distinct customers per city, by city name.
    pub customers_by_city: Vec<CustomerCount<CityName>>,
    /// Distinct customers per state, by state code.
    pub customers_by_state: Vec<CustomerCount<StateCode>>,
    /// Distinct customers per review score, 1 through 5.
    pub customers_by_score: Vec<CustomerCount<ReviewScore>>,
    /// Totals over `daily_orders`.
    pub summary: SummaryMetrics,
    /// Currency code used for `formatted_revenue`.
    pub currency: CurrencyCode,
    /// `summary.total_revenue` rendered for the configured locale.
    pub formatted_revenue: String,
}

impl DashboardReport {
    /// Filter `dataset` to `requested` (default: the dataset span) and derive
    /// every table.
    ///
    /// Requested bounds are clamped into the dataset span. An empty selection
    /// produces empty tables and zero metrics.
    pub fn build(
        dataset: &Dataset,
        requested: Option<DateRange>,
        config: &DashboardConfig,
    ) -> Result<Self, DashboardError> {
        let range = resolve_range(dataset.span(), requested);

        let selection = match &range {
            Some(range) => filter_range(dataset.records(), range, config.pending_delivery),
            None => Default::default(),
        };

        let mut daily = daily_orders(&selection);
        if config.fill_daily_gaps {
            daily = fill_calendar_gaps(&daily);
        }
        let summary = SummaryMetrics::from_daily(&daily);
        let formatted_revenue =
            format_currency(summary.total_revenue, &config.currency, &config.locale)?;

        let report = Self {
            range,
            record_count: selection.len(),
            category_metric: config.category_metric,
            category_totals: category_totals(&selection, config.category_metric),
            customers_by_city: customers_by_city(&selection),
            customers_by_state: customers_by_state(&selection),
            customers_by_score: customers_by_score(&selection),
            daily_orders: daily,
            summary,
            currency: config.currency.clone(),
            formatted_revenue,
        };
        info!(
            records = report.record_count,
            days = report.daily_orders.len(),
            total_orders = report.summary.total_orders,
            "built dashboard report"
        );
        Ok(report)
    }

    /// True when the range admitted no records.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn resolve_range(span: Option<DateRange>, requested: Option<DateRange>) -> Option<DateRange> {
    match (requested, span) {
        (Some(requested), Some(span)) => {
            let clamped = requested.clamp_to(&span);
            if clamped != requested {
                debug!(
                    requested_start = %requested.start(),
                    requested_end = %requested.end(),
                    start = %clamped.start(),
                    end = %clamped.end(),
                    "clamped date range to dataset span"
                );
            }
            Some(clamped)
        }
        (None, span) => span,
        (requested, None) => requested,
    }
}
