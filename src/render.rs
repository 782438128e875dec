//! Plain-text rendering of a `DashboardReport`.
//!
//! Rendering only reads the report; all figures come from the computation
//! layer.

use std::fmt::Display;
use std::io::{self, Write};

use crate::constants::defaults::BAR_WIDTH;
use crate::currency::format_grouped;
use crate::data::CustomerCount;
use crate::report::DashboardReport;

/// Write the full text dashboard to `out`.
///
/// `top` caps the number of rows shown in ranked tables (categories, states,
/// cities).
pub fn render_text<W: Write>(
    report: &DashboardReport,
    top: usize,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Order Insights")?;
    match &report.range {
        Some(range) => writeln!(
            out,
            "Range: {} to {} ({} records)",
            range.start(),
            range.end(),
            report.record_count
        )?,
        None => writeln!(out, "Range: (empty dataset)")?,
    }
    writeln!(out)?;

    writeln!(out, "== Daily Orders ==")?;
    writeln!(
        out,
        "Total orders:  {}",
        format_grouped(u128::from(report.summary.total_orders), ',')
    )?;
    writeln!(out, "Total Revenue: {}", report.formatted_revenue)?;
    if report.is_empty() {
        writeln!(out, "(no records in range)")?;
        return Ok(());
    }
    let max_orders = report
        .daily_orders
        .iter()
        .map(|row| row.order_count)
        .max()
        .unwrap_or(0);
    for row in &report.daily_orders {
        writeln!(
            out,
            "{}  {:>5}  {:>12.2}  {}",
            row.date,
            row.order_count,
            row.revenue,
            bar(row.order_count, max_orders)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "== Number of Customer by Rating ==")?;
    let mut scores = report.customers_by_score.clone();
    scores.sort_by(|a, b| b.customer_count.cmp(&a.customer_count).then(a.key.cmp(&b.key)));
    write_counts(out, &scores, scores.len())?;
    writeln!(out)?;

    writeln!(out, "== Product Categories ({:?}) ==", report.category_metric)?;
    let max_total = report
        .category_totals
        .first()
        .map(|row| row.total)
        .unwrap_or(0);
    let label_width = report
        .category_totals
        .iter()
        .take(top)
        .map(|row| row.category.chars().count())
        .max()
        .unwrap_or(0);
    for row in report.category_totals.iter().take(top) {
        writeln!(
            out,
            "{:<label_width$}  {:>10}  {}",
            row.category,
            row.total,
            bar_u128(row.total, max_total)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "== Customers by State ==")?;
    write_counts(out, &ranked(&report.customers_by_state), top)?;
    writeln!(out)?;

    writeln!(out, "== Customers by City ==")?;
    write_counts(out, &ranked(&report.customers_by_city), top)?;
    Ok(())
}

/// Counts sorted descending, ties by key.
fn ranked<K: Ord + Clone>(rows: &[CustomerCount<K>]) -> Vec<CustomerCount<K>> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| {
        b.customer_count
            .cmp(&a.customer_count)
            .then_with(|| a.key.cmp(&b.key))
    });
    ranked
}

fn write_counts<W: Write, K: Display>(
    out: &mut W,
    rows: &[CustomerCount<K>],
    top: usize,
) -> io::Result<()> {
    let max_count = rows.iter().map(|row| row.customer_count).max().unwrap_or(0);
    let labels: Vec<String> = rows.iter().take(top).map(|row| row.key.to_string()).collect();
    let label_width = labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, row) in labels.iter().zip(rows) {
        writeln!(
            out,
            "{label:<label_width$}  {:>8}  {}",
            row.customer_count,
            bar(row.customer_count, max_count)
        )?;
    }
    Ok(())
}

fn bar(value: u64, max: u64) -> String {
    bar_u128(u128::from(value), u128::from(max))
}

/// Bar scaled to `BAR_WIDTH`; any non-zero value gets at least one cell.
fn bar_u128(value: u128, max: u128) -> String {
    if value == 0 || max == 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(cells.clamp(1, BAR_WIDTH))
}
