//! CSV loading for the joined order dataset.
//!
//! The loader only reads and types the data: it resolves the required
//! columns from the header, parses the two timestamp columns, and sorts the
//! result by purchase time. Everything downstream borrows the `Dataset`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::constants::columns;
use crate::data::OrderRecord;
use crate::errors::DashboardError;
use crate::filter::DateRange;
use crate::timestamps::parse_timestamp;
use crate::types::ReviewScore;

/// Label used in errors when records come from an in-memory reader.
const READER_ORIGIN: &str = "<reader>";

/// Immutable, purchase-ordered set of order records.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<OrderRecord>,
}

impl Dataset {
    /// Read and sort the dataset stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| DashboardError::Load {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let records = read_records(file, path)?;
        info!(path = %path.display(), records = records.len(), "loaded order dataset");
        Ok(Self::from_records(records))
    }

    /// Read and sort a dataset from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DashboardError> {
        let records = read_records(reader, Path::new(READER_ORIGIN))?;
        Ok(Self::from_records(records))
    }

    /// Build a dataset from already-typed records, sorting them by purchase time.
    ///
    /// The sort is stable, so records sharing a purchase timestamp keep their
    /// input order.
    pub fn from_records(mut records: Vec<OrderRecord>) -> Self {
        records.sort_by_key(|record| record.order_purchase_timestamp);
        Self { records }
    }

    /// Records in ascending purchase order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Default filter window: earliest purchase day through latest delivery day.
    ///
    /// Falls back to the latest purchase day when nothing has been delivered.
    /// Returns `None` for an empty dataset.
    pub fn span(&self) -> Option<DateRange> {
        let first = self.records.first()?.purchase_date();
        let last_purchase = self.records.last()?.purchase_date();
        let last_delivery = self
            .records
            .iter()
            .filter_map(OrderRecord::delivery_date)
            .max();
        let end = last_delivery.unwrap_or(last_purchase).max(first);
        DateRange::new(first, end).ok()
    }
}

/// Header positions of the required columns.
struct ColumnIndex {
    order_id: usize,
    customer_id: usize,
    purchase: usize,
    delivered: usize,
    price: usize,
    category: usize,
    city: usize,
    state: usize,
    score: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, origin: &Path) -> Result<Self, DashboardError> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);
        let missing: Vec<String> = columns::REQUIRED
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::MissingColumns {
                path: origin.to_path_buf(),
                columns: missing,
            });
        }
        // Every lookup below succeeded in the check above.
        let index = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            order_id: index(columns::ORDER_ID),
            customer_id: index(columns::CUSTOMER_ID),
            purchase: index(columns::ORDER_PURCHASE_TIMESTAMP),
            delivered: index(columns::ORDER_DELIVERED_CUSTOMER_DATE),
            price: index(columns::PRICE),
            category: index(columns::PRODUCT_CATEGORY_NAME),
            city: index(columns::CUSTOMER_CITY),
            state: index(columns::CUSTOMER_STATE),
            score: index(columns::REVIEW_SCORE),
        })
    }
}

fn read_records<R: Read>(reader: R, origin: &Path) -> Result<Vec<OrderRecord>, DashboardError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| csv_failure(err, origin))?
        .clone();
    let index = ColumnIndex::resolve(&headers, origin)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|err| csv_failure(err, origin))?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let record = parse_row(&row, &index).map_err(|reason| DashboardError::MalformedRow {
            path: PathBuf::from(origin),
            line,
            reason,
        })?;
        records.push(record);
    }
    debug!(origin = %origin.display(), rows = records.len(), "parsed order rows");
    Ok(records)
}

/// Attach the origin to a reader-level failure; positioned errors keep their line.
fn csv_failure(err: csv::Error, origin: &Path) -> DashboardError {
    let path = PathBuf::from(origin);
    let reason = err.to_string();
    match err.position() {
        Some(pos) => DashboardError::MalformedRow {
            path,
            line: pos.line(),
            reason,
        },
        None => DashboardError::Load { path, reason },
    }
}

fn parse_row(row: &StringRecord, index: &ColumnIndex) -> Result<OrderRecord, String> {
    let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

    let order_id = required_text(field(index.order_id), columns::ORDER_ID)?;
    let customer_id = required_text(field(index.customer_id), columns::CUSTOMER_ID)?;
    let order_purchase_timestamp = parse_timestamp(field(index.purchase)).ok_or_else(|| {
        format!(
            "{} '{}' is not a timestamp",
            columns::ORDER_PURCHASE_TIMESTAMP,
            field(index.purchase)
        )
    })?;
    let order_delivered_customer_date = optional_timestamp(
        field(index.delivered),
        columns::ORDER_DELIVERED_CUSTOMER_DATE,
    )?;
    let price = field(index.price)
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| format!("{} '{}' is not a number", columns::PRICE, field(index.price)))?;
    let review_score = parse_review_score(field(index.score))?;

    Ok(OrderRecord {
        order_id,
        customer_id,
        order_purchase_timestamp,
        order_delivered_customer_date,
        price,
        product_category_name: optional_text(field(index.category)),
        customer_city: field(index.city).to_string(),
        customer_state: field(index.state).to_string(),
        review_score,
    })
}

fn required_text(value: &str, column: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err(format!("{column} is blank"));
    }
    Ok(value.to_string())
}

fn optional_text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_timestamp(value: &str, column: &str) -> Result<Option<NaiveDateTime>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_timestamp(value)
        .map(Some)
        .ok_or_else(|| format!("{column} '{value}' is not a timestamp"))
}

/// Scores may be written as integers or integral floats (`4`, `4.0`).
///
/// Whole numbers that do not fit a `ReviewScore` load as `None`; the score
/// aggregation ignores them like any other out-of-scale value.
fn parse_review_score(value: &str) -> Result<Option<ReviewScore>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    let parsed = value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| format!("{} '{value}' is not a number", columns::REVIEW_SCORE))?;
    if parsed.fract() != 0.0 {
        return Err(format!(
            "{} '{value}' is not a whole score",
            columns::REVIEW_SCORE
        ));
    }
    if !(0.0..=f64::from(ReviewScore::MAX)).contains(&parsed) {
        debug!(score = value, "review score outside the storable range, treating as blank");
        return Ok(None);
    }
    Ok(Some(parsed as ReviewScore))
}
