use std::path::PathBuf;

use serde::Serialize;

use crate::constants::defaults;
use crate::types::{CurrencyCode, LocaleId};

/// Measure computed per product category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMetric {
    /// Sum of `order_id` values that parse as unsigned integers.
    ///
    /// Identifiers are not quantities; this reproduces the historical
    /// dashboard figure. Ids that do not parse contribute zero.
    #[default]
    OrderIdSum,
    /// Number of line items in the category.
    ItemCount,
    /// Number of distinct orders in the category.
    DistinctOrders,
}

/// How the range filter treats records without a delivery timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingDeliveryPolicy {
    /// A missing delivery date never satisfies the upper bound.
    #[default]
    Exclude,
    /// A missing delivery date always satisfies the upper bound.
    Include,
}

/// Top-level dashboard configuration.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// CSV file holding the joined order dataset.
    pub data_path: PathBuf,
    /// Measure reported by the category totals table.
    pub category_metric: CategoryMetric,
    /// Upper-bound handling for undelivered orders.
    pub pending_delivery: PendingDeliveryPolicy,
    /// Currency code shown next to total revenue.
    pub currency: CurrencyCode,
    /// Locale whose separators format total revenue.
    pub locale: LocaleId,
    /// Emit zero rows for days without orders between the first and last bucket.
    pub fill_daily_gaps: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(defaults::DATA_PATH),
            category_metric: CategoryMetric::default(),
            pending_delivery: PendingDeliveryPolicy::default(),
            currency: defaults::CURRENCY.to_string(),
            locale: defaults::LOCALE.to_string(),
            fill_daily_gaps: false,
        }
    }
}

impl DashboardConfig {
    /// Create a config reading from `data_path` with default settings.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Override the category measure.
    pub fn with_category_metric(mut self, metric: CategoryMetric) -> Self {
        self.category_metric = metric;
        self
    }

    /// Override how undelivered orders are filtered.
    pub fn with_pending_delivery(mut self, policy: PendingDeliveryPolicy) -> Self {
        self.pending_delivery = policy;
        self
    }

    /// Override the display currency.
    pub fn with_currency(mut self, currency: impl Into<CurrencyCode>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Override the display locale.
    pub fn with_locale(mut self, locale: impl Into<LocaleId>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Enable or disable zero rows for empty days in the daily table.
    pub fn with_daily_gap_filling(mut self, fill: bool) -> Self {
        self.fill_daily_gaps = fill;
        self
    }
}
