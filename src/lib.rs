#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Date-bucketed, category, and customer aggregations.
pub mod aggregations;
/// Command-line runner over the dashboard pipeline.
pub mod cli;
/// Dashboard configuration types.
pub mod config;
/// Centralized constants (column names, score scale, defaults).
pub mod constants;
/// Locale-aware currency formatting.
pub mod currency;
/// Order record and derived table types.
pub mod data;
/// Date-range filtering.
pub mod filter;
/// CSV dataset loading.
pub mod loader;
/// Summary metrics over derived tables.
pub mod metrics;
/// Plain-text rendering of reports.
pub mod render;
/// Per-range report assembly.
pub mod report;
/// Timestamp and date parsing helpers.
pub mod timestamps;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregations::{
    category_totals, count_distinct_customers_by, customers_by_city, customers_by_score,
    customers_by_state, daily_orders, fill_calendar_gaps,
};
pub use config::{CategoryMetric, DashboardConfig, PendingDeliveryPolicy};
pub use currency::format_currency;
pub use data::{CategoryTotal, CustomerCount, DailyOrders, OrderRecord};
pub use errors::DashboardError;
pub use filter::{DateRange, Selection, filter_range};
pub use loader::Dataset;
pub use metrics::SummaryMetrics;
pub use report::DashboardReport;
pub use types::{
    CategoryName, CityName, CurrencyCode, CustomerId, LocaleId, OrderId, ReviewScore, StateCode,
};
