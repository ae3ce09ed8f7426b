//! Read-only command handlers: `list`, `summary` and `chart`.

use crate::args::{ChartArgs, ChartKind, ListArgs, SummaryArgs};
use crate::commands::{describe, plural, today, Out};
use crate::ledger::{Buckets, DashboardSummary};
use crate::model::{Amount, SaleRecord};
use crate::{Config, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Lists the sales that match the filter, newest date first.
pub async fn list_sales(config: Config, args: ListArgs) -> Result<Out<Vec<SaleRecord>>> {
    let ledger = config.open_ledger().await?;
    let filter = args.filter();
    let sales: Vec<SaleRecord> = ledger.list_sales(&filter).into_iter().cloned().collect();
    debug!("{} of {} sales match", sales.len(), ledger.ledger().len());

    let label = config.currency_label();
    let mut message = format!("Found {}", plural(sales.len(), "sale"));
    for sale in &sales {
        message.push('\n');
        message.push_str(&describe(sale, label));
    }
    Ok(Out::new(message, sales))
}

/// Shows the dashboard summary for `today` (the local date unless given).
pub async fn summary(config: Config, args: SummaryArgs) -> Result<Out<DashboardSummary>> {
    let ledger = config.open_ledger().await?;
    let today = args.today().unwrap_or_else(today);
    let summary = ledger.dashboard_summary(today, config.recent_count());

    let label = config.currency_label();
    let mut message = format!(
        "{}\nTotal revenue: {}\nToday's revenue ({today}): {}\nAverage sale: {}",
        plural(summary.count, "sale"),
        summary.total_revenue.display_with(label),
        summary.today_revenue.display_with(label),
        summary.average_sale.display_with(label),
    );
    if !summary.recent_sales.is_empty() {
        message.push_str("\nRecent sales:");
        for sale in &summary.recent_sales {
            message.push_str("\n  ");
            message.push_str(&describe(sale, label));
        }
    }
    Ok(Out::new(message, summary))
}

/// One bar of a chart.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: ChartValue,
}

/// A chart value is either revenue or a number of sales.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartValue {
    Amount(Amount),
    Count(usize),
}

/// The points of one chart, in ascending label order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_buckets(kind: ChartKind, buckets: Buckets) -> Self {
        Self {
            kind,
            points: buckets
                .into_iter()
                .map(|(label, value)| ChartPoint {
                    label,
                    value: ChartValue::Amount(value),
                })
                .collect(),
        }
    }

    fn from_counts(kind: ChartKind, counts: BTreeMap<String, usize>) -> Self {
        Self {
            kind,
            points: counts
                .into_iter()
                .map(|(label, value)| ChartPoint {
                    label,
                    value: ChartValue::Count(value),
                })
                .collect(),
        }
    }
}

/// Groups the sales by the requested dimension.
///
/// The `day` chart covers the most recent `--limit` days that have sales, falling back to the
/// configured day window.
pub async fn chart(config: Config, args: ChartArgs) -> Result<Out<ChartSeries>> {
    let ledger = config.open_ledger().await?;
    let kind = args.kind();
    let series = match kind {
        ChartKind::Month => ChartSeries::from_buckets(kind, ledger.aggregate_by_month()),
        ChartKind::Payment => ChartSeries::from_buckets(kind, ledger.aggregate_by_payment()),
        ChartKind::Category => ChartSeries::from_buckets(kind, ledger.aggregate_by_category()),
        ChartKind::Day => {
            let limit = args.limit().unwrap_or_else(|| config.day_window());
            ChartSeries::from_buckets(kind, ledger.aggregate_by_day(limit))
        }
        ChartKind::PaymentCount => ChartSeries::from_counts(kind, ledger.count_by_payment()),
    };

    let label = config.currency_label();
    let mut message = format!("Sales by {kind}");
    if series.points.is_empty() {
        message.push_str(": no sales yet");
    }
    for point in &series.points {
        let value = match point.value {
            ChartValue::Amount(amount) => amount.display_with(label),
            ChartValue::Count(count) => plural(count, "sale"),
        };
        message.push_str(&format!("\n  {}: {value}", point.label));
    }
    Ok(Out::new(message, series))
}
