/// Column names the loader requires in the input header.
pub mod columns {
    /// Order identifier column.
    pub const ORDER_ID: &str = "order_id";
    /// Customer identifier column.
    pub const CUSTOMER_ID: &str = "customer_id";
    /// Purchase timestamp column (sort key and day-bucketing basis).
    pub const ORDER_PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
    /// Delivery timestamp column (blank for undelivered orders).
    pub const ORDER_DELIVERED_CUSTOMER_DATE: &str = "order_delivered_customer_date";
    /// Line-item price column.
    pub const PRICE: &str = "price";
    /// Product category column.
    pub const PRODUCT_CATEGORY_NAME: &str = "product_category_name";
    /// Customer city column.
    pub const CUSTOMER_CITY: &str = "customer_city";
    /// Customer state column.
    pub const CUSTOMER_STATE: &str = "customer_state";
    /// Review score column.
    pub const REVIEW_SCORE: &str = "review_score";

    /// Every column the loader reads, in canonical order.
    pub const REQUIRED: [&str; 9] = [
        ORDER_ID,
        CUSTOMER_ID,
        ORDER_PURCHASE_TIMESTAMP,
        ORDER_DELIVERED_CUSTOMER_DATE,
        PRICE,
        PRODUCT_CATEGORY_NAME,
        CUSTOMER_CITY,
        CUSTOMER_STATE,
        REVIEW_SCORE,
    ];
}

/// Constants for review score bucketing.
pub mod scores {
    use crate::types::ReviewScore;

    /// The fixed review score scale, in display order.
    pub const REVIEW_SCORE_SCALE: [ReviewScore; 5] = [1, 2, 3, 4, 5];
}

/// Timestamp layouts accepted by the loader.
pub mod timestamps {
    /// Date-time layouts tried in order (`%.f` also matches no fraction).
    pub const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    /// Date-only layout, read as midnight.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Defaults used by configuration and the CLI.
pub mod defaults {
    /// Dataset path used when neither flag nor environment variable is set.
    pub const DATA_PATH: &str = "dashboard/all_data.csv";
    /// Environment variable consulted for the dataset path.
    pub const DATA_PATH_ENV: &str = "ORDER_INSIGHTS_DATA";
    /// Currency used to display total revenue.
    pub const CURRENCY: &str = "AUD";
    /// Locale used to display total revenue.
    pub const LOCALE: &str = "es_CO";
    /// Rows shown per ranked table in text output.
    pub const TOP_ROWS: usize = 10;
    /// Width in characters of the longest bar in text charts.
    pub const BAR_WIDTH: usize = 40;
}
