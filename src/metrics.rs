use serde::Serialize;

use crate::data::DailyOrders;

/// Headline figures derived from the daily orders table.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    /// Sum of per-day distinct order counts.
    pub total_orders: u64,
    /// Sum of per-day revenue.
    pub total_revenue: f64,
}

impl SummaryMetrics {
    /// Compute totals from daily rows. Empty input yields zeros.
    pub fn from_daily(daily: &[DailyOrders]) -> Self {
        daily.iter().fold(Self::default(), |acc, row| Self {
            total_orders: acc.total_orders + row.order_count,
            total_revenue: acc.total_revenue + row.revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(day: u32, order_count: u64, revenue: f64) -> DailyOrders {
        DailyOrders {
            date: NaiveDate::from_ymd_opt(2018, 1, day).unwrap(),
            order_count,
            revenue,
        }
    }

    #[test]
    fn sums_daily_rows() {
        let summary = SummaryMetrics::from_daily(&[row(1, 1, 15.0), row(2, 3, 20.5)]);
        assert_eq!(summary.total_orders, 4);
        assert!((summary.total_revenue - 35.5).abs() < 1e-9);
    }

    #[test]
    fn empty_daily_table_reports_zero() {
        let summary = SummaryMetrics::from_daily(&[]);
        assert_eq!(summary, SummaryMetrics::default());
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_revenue, 0.0);
    }
}
