//! Derived tables computed from a record selection.
//!
//! Every function here is pure: it borrows records, groups them, and returns
//! a freshly built table. Output order is deterministic for a given input.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::CategoryMetric;
use crate::constants::scores::REVIEW_SCORE_SCALE;
use crate::data::{CategoryTotal, CustomerCount, DailyOrders, OrderRecord};
use crate::types::{CategoryName, CityName, ReviewScore, StateCode};

/// Distinct orders and summed price per purchase day, ascending by day.
///
/// Days without records are not emitted; see [`fill_calendar_gaps`].
pub fn daily_orders<'a, I>(records: I) -> Vec<DailyOrders>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut buckets: BTreeMap<NaiveDate, (HashSet<&'a str>, f64)> = BTreeMap::new();
    for record in records {
        let (orders, revenue) = buckets.entry(record.purchase_date()).or_default();
        orders.insert(record.order_id.as_str());
        *revenue += record.price;
    }
    buckets
        .into_iter()
        .map(|(date, (orders, revenue))| DailyOrders {
            date,
            order_count: orders.len() as u64,
            revenue,
        })
        .collect()
}

/// Expand a daily table so every day between its first and last row is present.
///
/// Missing days are emitted with zero orders and zero revenue. `rows` must be
/// ascending by date, as produced by [`daily_orders`].
pub fn fill_calendar_gaps(rows: &[DailyOrders]) -> Vec<DailyOrders> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Vec::new();
    };
    let mut existing = rows.iter().peekable();
    first
        .date
        .iter_days()
        .take_while(|day| *day <= last.date)
        .map(|day| match existing.next_if(|row| row.date == day) {
            Some(row) => row.clone(),
            None => DailyOrders {
                date: day,
                order_count: 0,
                revenue: 0.0,
            },
        })
        .collect()
}

/// Per-category measure, descending by total with ties broken by name.
///
/// Records without a category are skipped.
pub fn category_totals<'a, I>(records: I, metric: CategoryMetric) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a OrderRecord>> = BTreeMap::new();
    for record in records {
        if let Some(category) = record.product_category_name.as_deref() {
            groups.entry(category).or_default().push(record);
        }
    }

    let mut unparsed_ids = 0usize;
    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, members)| {
            let total = match metric {
                CategoryMetric::OrderIdSum => {
                    members.iter().fold(0u128, |sum, record| {
                        match record.order_id.parse::<u128>() {
                            Ok(value) => sum.saturating_add(value),
                            Err(_) => {
                                unparsed_ids += 1;
                                sum
                            }
                        }
                    })
                }
                CategoryMetric::ItemCount => members.len() as u128,
                CategoryMetric::DistinctOrders => members
                    .iter()
                    .map(|record| record.order_id.as_str())
                    .collect::<HashSet<_>>()
                    .len() as u128,
            };
            CategoryTotal {
                category: CategoryName::from(category),
                total,
            }
        })
        .collect();
    if unparsed_ids > 0 {
        warn!(
            unparsed_ids,
            "non-numeric order ids contributed zero to category totals; \
             try --category-metric item-count or distinct-orders"
        );
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}

/// Count distinct `customer_id` values per key, ascending by key.
///
/// Records for which `key` returns `None` are skipped.
pub fn count_distinct_customers_by<'a, I, K, F>(records: I, mut key: F) -> Vec<CustomerCount<K>>
where
    I: IntoIterator<Item = &'a OrderRecord>,
    K: Ord,
    F: FnMut(&'a OrderRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, HashSet<&'a str>> = BTreeMap::new();
    for record in records {
        if let Some(value) = key(record) {
            groups
                .entry(value)
                .or_default()
                .insert(record.customer_id.as_str());
        }
    }
    groups
        .into_iter()
        .map(|(key, customers)| CustomerCount {
            key,
            customer_count: customers.len() as u64,
        })
        .collect()
}

/// Distinct customers per city.
pub fn customers_by_city<'a, I>(records: I) -> Vec<CustomerCount<CityName>>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    count_distinct_customers_by(records, |record| Some(record.customer_city.clone()))
}

/// Distinct customers per state.
pub fn customers_by_state<'a, I>(records: I) -> Vec<CustomerCount<StateCode>>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    count_distinct_customers_by(records, |record| Some(record.customer_state.clone()))
}

/// Distinct customers per review score, in scale order 1 through 5.
///
/// Only scores that occur are emitted. Unreviewed records and scores outside
/// the scale are dropped.
pub fn customers_by_score<'a, I>(records: I) -> Vec<CustomerCount<ReviewScore>>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut out_of_scale = 0usize;
    let counts = count_distinct_customers_by(records, |record| {
        let score = record.review_score?;
        if REVIEW_SCORE_SCALE.contains(&score) {
            Some(score)
        } else {
            out_of_scale += 1;
            None
        }
    });
    if out_of_scale > 0 {
        debug!(out_of_scale, "dropped review scores outside the 1-5 scale");
    }
    REVIEW_SCORE_SCALE
        .iter()
        .filter_map(|score| counts.iter().find(|row| row.key == *score).cloned())
        .collect()
}
