use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use crate::types::{CategoryName, CityName, CustomerId, OrderId, ReviewScore, StateCode};

/// One denormalized row joining order, item, customer, and review facts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier (repeats across items of one order).
    pub order_id: OrderId,
    /// Purchasing customer.
    pub customer_id: CustomerId,
    /// When the order was placed. Sort key and day-bucketing basis.
    pub order_purchase_timestamp: NaiveDateTime,
    /// When delivery completed; `None` while the order is in transit.
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    /// Line-item price.
    pub price: f64,
    /// Product category; `None` for uncategorized products.
    pub product_category_name: Option<CategoryName>,
    /// Customer's city as written in the source file.
    pub customer_city: CityName,
    /// Customer's state code.
    pub customer_state: StateCode,
    /// Review score; `None` when the order was never reviewed.
    pub review_score: Option<ReviewScore>,
}

impl OrderRecord {
    /// Calendar day of the purchase timestamp.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }

    /// Calendar day of the delivery timestamp, if delivered.
    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.order_delivered_customer_date.map(|ts| ts.date())
    }
}

/// Orders and revenue for one purchase day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyOrders {
    /// Purchase day.
    pub date: NaiveDate,
    /// Distinct orders placed that day.
    pub order_count: u64,
    /// Sum of line-item prices placed that day.
    pub revenue: f64,
}

/// Measure for one product category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: CategoryName,
    /// Value of the configured category metric.
    pub total: u128,
}

/// Distinct customer count for one grouping key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCount<K> {
    /// Group key: city, state, or review score.
    pub key: K,
    /// Distinct `customer_id` values in the group.
    pub customer_count: u64,
}
