use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use order_insights::{
    CategoryMetric, DashboardConfig, DashboardReport, Dataset, DateRange, OrderRecord,
    PendingDeliveryPolicy, category_totals, customers_by_city, customers_by_score,
    customers_by_state, daily_orders, filter_range,
};

fn ts(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

struct Row<'a> {
    order: &'a str,
    customer: &'a str,
    purchased: &'a str,
    delivered: Option<&'a str>,
    price: f64,
    category: &'a str,
    city: &'a str,
    state: &'a str,
    score: u8,
}

fn build_record(row: Row<'_>) -> OrderRecord {
    OrderRecord {
        order_id: row.order.to_string(),
        customer_id: row.customer.to_string(),
        order_purchase_timestamp: ts(row.purchased),
        order_delivered_customer_date: row.delivered.map(ts),
        price: row.price,
        product_category_name: Some(row.category.to_string()),
        customer_city: row.city.to_string(),
        customer_state: row.state.to_string(),
        review_score: Some(row.score),
    }
}

fn fixture() -> Dataset {
    let rows = vec![
        Row {
            order: "o3",
            customer: "c3",
            purchased: "2018-02-10 14:00:00",
            delivered: Some("2018-02-20 10:00:00"),
            price: 30.0,
            category: "toys",
            city: "rio de janeiro",
            state: "RJ",
            score: 2,
        },
        Row {
            order: "o1",
            customer: "c1",
            purchased: "2018-01-01 09:00:00",
            delivered: Some("2018-01-05 10:00:00"),
            price: 10.0,
            category: "books",
            city: "sao paulo",
            state: "SP",
            score: 5,
        },
        Row {
            order: "o1",
            customer: "c1",
            purchased: "2018-01-01 09:00:00",
            delivered: Some("2018-01-05 10:00:00"),
            price: 5.0,
            category: "books",
            city: "sao paulo",
            state: "SP",
            score: 5,
        },
        Row {
            order: "o2",
            customer: "c2",
            purchased: "2018-01-15 11:00:00",
            delivered: Some("2018-01-25 10:00:00"),
            price: 20.0,
            category: "toys",
            city: "campinas",
            state: "SP",
            score: 4,
        },
        Row {
            order: "o4",
            customer: "c2",
            purchased: "2018-03-01 08:00:00",
            delivered: None,
            price: 99.0,
            category: "garden",
            city: "campinas",
            state: "SP",
            score: 1,
        },
        Row {
            order: "o5",
            customer: "c4",
            purchased: "2018-03-02 18:00:00",
            delivered: Some("2018-03-30 12:00:00"),
            price: 42.5,
            category: "books",
            city: "curitiba",
            state: "PR",
            score: 3,
        },
    ];
    Dataset::from_records(rows.into_iter().map(build_record).collect())
}

#[test]
fn scenario_from_three_records() {
    let records = vec![
        build_record(Row {
            order: "A",
            customer: "X",
            purchased: "2018-01-01 10:00:00",
            delivered: Some("2018-01-03 10:00:00"),
            price: 10.0,
            category: "misc",
            city: "City1",
            state: "S1",
            score: 5,
        }),
        build_record(Row {
            order: "A",
            customer: "X",
            purchased: "2018-01-01 10:00:00",
            delivered: Some("2018-01-03 10:00:00"),
            price: 5.0,
            category: "misc",
            city: "City1",
            state: "S1",
            score: 5,
        }),
        build_record(Row {
            order: "B",
            customer: "Y",
            purchased: "2018-01-02 10:00:00",
            delivered: Some("2018-01-04 10:00:00"),
            price: 20.0,
            category: "misc",
            city: "City2",
            state: "S1",
            score: 4,
        }),
    ];

    let daily = daily_orders(&records);
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].date, date("2018-01-01"));
    assert_eq!(daily[0].order_count, 1);
    assert!((daily[0].revenue - 15.0).abs() < 1e-9);
    assert_eq!(daily[1].date, date("2018-01-02"));
    assert_eq!(daily[1].order_count, 1);
    assert!((daily[1].revenue - 20.0).abs() < 1e-9);

    let cities: Vec<(String, u64)> = customers_by_city(&records)
        .into_iter()
        .map(|row| (row.key, row.customer_count))
        .collect();
    assert_eq!(
        cities,
        vec![("City1".to_string(), 1), ("City2".to_string(), 1)]
    );
}

#[test]
fn records_are_sorted_and_left_untouched_by_filtering() {
    let dataset = fixture();
    let purchases: Vec<NaiveDateTime> = dataset
        .records()
        .iter()
        .map(|record| record.order_purchase_timestamp)
        .collect();
    let mut sorted = purchases.clone();
    sorted.sort();
    assert_eq!(purchases, sorted);

    let before = dataset.records().to_vec();
    let range = DateRange::new(date("2018-01-10"), date("2018-01-31")).unwrap();
    let selection = filter_range(dataset.records(), &range, PendingDeliveryPolicy::Exclude);
    assert_eq!(selection.len(), 1);
    assert_eq!(dataset.records(), before.as_slice());
}

#[test]
fn building_twice_is_identical() {
    let dataset = fixture();
    let config = DashboardConfig::default();
    let range = Some(DateRange::new(date("2018-01-01"), date("2018-02-28")).unwrap());
    let first = DashboardReport::build(&dataset, range, &config).unwrap();
    let second = DashboardReport::build(&dataset, range, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn daily_counts_partition_distinct_orders() {
    let dataset = fixture();
    let span = dataset.span().unwrap();
    for policy in [PendingDeliveryPolicy::Exclude, PendingDeliveryPolicy::Include] {
        let selection = filter_range(dataset.records(), &span, policy);
        let distinct: HashSet<&str> = selection
            .iter()
            .map(|record| record.order_id.as_str())
            .collect();
        let total: u64 = daily_orders(&selection)
            .iter()
            .map(|row| row.order_count)
            .sum();
        assert_eq!(total, distinct.len() as u64);
    }
}

#[test]
fn widening_the_range_never_shrinks_tables() {
    let dataset = fixture();
    let ranges = [
        ("2018-01-01", "2018-01-05"),
        ("2018-01-01", "2018-01-31"),
        ("2018-01-01", "2018-02-28"),
        ("2018-01-01", "2018-03-31"),
    ];
    let mut previous: Option<(usize, usize, usize, usize, usize, u64)> = None;
    for (start, end) in ranges {
        let range = DateRange::new(date(start), date(end)).unwrap();
        let selection = filter_range(dataset.records(), &range, PendingDeliveryPolicy::Exclude);
        let daily = daily_orders(&selection);
        let order_total: u64 = daily.iter().map(|row| row.order_count).sum();
        let current = (
            daily.len(),
            category_totals(&selection, CategoryMetric::ItemCount).len(),
            customers_by_city(&selection).len(),
            customers_by_state(&selection).len(),
            customers_by_score(&selection).len(),
            order_total,
        );
        if let Some(previous) = previous {
            assert!(current.0 >= previous.0);
            assert!(current.1 >= previous.1);
            assert!(current.2 >= previous.2);
            assert!(current.3 >= previous.3);
            assert!(current.4 >= previous.4);
            assert!(current.5 >= previous.5);
        }
        previous = Some(current);
    }
}

#[test]
fn empty_selection_yields_empty_tables_and_zero_metrics() {
    let dataset = fixture();
    // Nothing purchased on or after 2018-03-02 was delivered by that day.
    let range = DateRange::new(date("2018-03-02"), date("2018-03-02")).unwrap();
    let report =
        DashboardReport::build(&dataset, Some(range), &DashboardConfig::default()).unwrap();
    assert!(report.is_empty());
    assert!(report.daily_orders.is_empty());
    assert!(report.category_totals.is_empty());
    assert!(report.customers_by_city.is_empty());
    assert!(report.customers_by_state.is_empty());
    assert!(report.customers_by_score.is_empty());
    assert_eq!(report.summary.total_orders, 0);
    assert_eq!(report.summary.total_revenue, 0.0);
}

#[test]
fn score_rows_follow_the_scale_regardless_of_input_order() {
    let dataset = fixture();
    let span = dataset.span().unwrap();
    let selection = filter_range(dataset.records(), &span, PendingDeliveryPolicy::Include);
    let mut reversed: Vec<&OrderRecord> = selection.iter().collect();
    reversed.reverse();

    let keys = |rows: Vec<order_insights::CustomerCount<u8>>| {
        rows.into_iter().map(|row| row.key).collect::<Vec<_>>()
    };
    assert_eq!(keys(customers_by_score(&selection)), vec![1, 2, 3, 4, 5]);
    assert_eq!(keys(customers_by_score(reversed)), vec![1, 2, 3, 4, 5]);
}

#[test]
fn report_clamps_requested_range_to_dataset_span() {
    let dataset = fixture();
    let requested = DateRange::new(date("2010-01-01"), date("2030-01-01")).unwrap();
    let report =
        DashboardReport::build(&dataset, Some(requested), &DashboardConfig::default()).unwrap();
    assert_eq!(report.range, dataset.span());
    assert_eq!(report.range.unwrap().start(), date("2018-01-01"));
    assert_eq!(report.range.unwrap().end(), date("2018-03-30"));
    // o4 is undelivered and excluded by default.
    assert_eq!(report.record_count, 5);
    assert_eq!(report.summary.total_orders, 4);
    assert!((report.summary.total_revenue - 107.5).abs() < 1e-9);
    assert_eq!(report.formatted_revenue, "AU$\u{a0}107,50");
}

#[test]
fn category_metric_is_configurable() {
    let dataset = fixture();
    let config = DashboardConfig::default().with_category_metric(CategoryMetric::ItemCount);
    let report = DashboardReport::build(&dataset, None, &config).unwrap();
    let categories: Vec<(String, u128)> = report
        .category_totals
        .iter()
        .map(|row| (row.category.clone(), row.total))
        .collect();
    assert_eq!(
        categories,
        vec![("books".to_string(), 3), ("toys".to_string(), 2)]
    );
}
