use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{CategoryMetric, DashboardConfig, PendingDeliveryPolicy};
use crate::constants::defaults;
use crate::filter::DateRange;
use crate::loader::Dataset;
use crate::render::render_text;
use crate::report::DashboardReport;
use crate::timestamps::parse_date;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryMetricArg {
    OrderIdSum,
    ItemCount,
    DistinctOrders,
}

impl From<CategoryMetricArg> for CategoryMetric {
    fn from(value: CategoryMetricArg) -> Self {
        match value {
            CategoryMetricArg::OrderIdSum => CategoryMetric::OrderIdSum,
            CategoryMetricArg::ItemCount => CategoryMetric::ItemCount,
            CategoryMetricArg::DistinctOrders => CategoryMetric::DistinctOrders,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PendingDeliveryArg {
    Exclude,
    Include,
}

impl From<PendingDeliveryArg> for PendingDeliveryPolicy {
    fn from(value: PendingDeliveryArg) -> Self {
        match value {
            PendingDeliveryArg::Exclude => PendingDeliveryPolicy::Exclude,
            PendingDeliveryArg::Include => PendingDeliveryPolicy::Include,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "order_insights",
    disable_help_subcommand = true,
    about = "Summarize orders, revenue, and customers over a date range",
    long_about = "Load the joined order dataset, filter it to a purchase/delivery date range, and print daily orders, category totals, and customer counts by city, state, and review score.",
    after_help = "The dataset path is resolved in order by explicit arg, the ORDER_INSIGHTS_DATA environment variable, then dashboard/all_data.csv."
)]
struct DashboardCli {
    #[arg(long = "data", value_name = "PATH", help = "CSV file with the joined order dataset")]
    data: Option<PathBuf>,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        value_parser = parse_date_arg,
        help = "First purchase day to include (default: earliest purchase)"
    )]
    start: Option<NaiveDate>,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        value_parser = parse_date_arg,
        help = "Last delivery day to include (default: latest delivery)"
    )]
    end: Option<NaiveDate>,
    #[arg(
        long = "category-metric",
        value_enum,
        default_value_t = CategoryMetricArg::OrderIdSum,
        help = "Measure reported per product category"
    )]
    category_metric: CategoryMetricArg,
    #[arg(
        long = "pending-delivery",
        value_enum,
        default_value_t = PendingDeliveryArg::Exclude,
        help = "Whether undelivered orders pass the end-date bound"
    )]
    pending_delivery: PendingDeliveryArg,
    #[arg(long, default_value = defaults::CURRENCY, help = "Currency code for total revenue")]
    currency: String,
    #[arg(long, default_value = defaults::LOCALE, help = "Locale used to format total revenue")]
    locale: String,
    #[arg(
        long = "fill-gaps",
        help = "Emit zero rows for days without orders in the daily table"
    )]
    fill_gaps: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,
    #[arg(
        long,
        default_value_t = defaults::TOP_ROWS,
        value_parser = parse_positive_usize,
        help = "Rows shown per ranked table in text output"
    )]
    top: usize,
}

impl DashboardCli {
    fn config(&self, data_path: PathBuf) -> DashboardConfig {
        DashboardConfig::new(data_path)
            .with_category_metric(self.category_metric.into())
            .with_pending_delivery(self.pending_delivery.into())
            .with_currency(self.currency.clone())
            .with_locale(self.locale.clone())
            .with_daily_gap_filling(self.fill_gaps)
    }

    /// Explicit bounds from flags; a missing side takes the dataset span edge.
    ///
    /// A lone bound is clamped into the span before pairing, so it cannot
    /// invert the range.
    fn requested_range(&self, dataset: &Dataset) -> Result<Option<DateRange>, Box<dyn Error>> {
        let span = dataset.span();
        let clamp = |date: NaiveDate| match span {
            Some(span) => date.clamp(span.start(), span.end()),
            None => date,
        };
        let (start, end) = match (self.start, self.end) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => {
                let start = clamp(start);
                (start, span.map_or(start, |span| span.end()))
            }
            (None, Some(end)) => {
                let end = clamp(end);
                (span.map_or(end, |span| span.start()), end)
            }
        };
        Ok(Some(DateRange::new(start, end)?))
    }
}

/// Run the dashboard CLI with `args_iter` (program name excluded) and print to stdout.
pub fn run_dashboard<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<DashboardCli, _>(
        std::iter::once("order_insights".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let data_path = resolve_data_path(
        cli.data.clone(),
        std::env::var(defaults::DATA_PATH_ENV).ok(),
    );
    let config = cli.config(data_path);
    let dataset = Dataset::load(&config.data_path)?;
    let requested = cli.requested_range(&dataset)?;
    let report = DashboardReport::build(&dataset, requested, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => render_text(&report, cli.top, &mut out)?,
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    out.flush()?;
    Ok(())
}

/// Flag first, then environment, then the project default.
fn resolve_data_path(explicit: Option<PathBuf>, from_env: Option<String>) -> PathBuf {
    explicit
        .or_else(|| {
            from_env
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(defaults::DATA_PATH))
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("Could not parse '{raw}' as a YYYY-MM-DD date"))
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse --top value '{raw}' as a positive integer"))?;
    if parsed == 0 {
        return Err("--top must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
