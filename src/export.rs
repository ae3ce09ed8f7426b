//! CSV export of sale records.
//!
//! Values are never quoted. A value that contains the delimiter has it replaced with
//! `DELIMITER_PLACEHOLDER`, and line breaks are replaced with a space, so a product called
//! `Tee, large` exports as `Tee; large`. The export is therefore lossy for such values.

use crate::model::SaleRecord;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

pub const DELIMITER: u8 = b',';
pub const DELIMITER_PLACEHOLDER: &str = ";";

pub const HEADERS: [&str; 9] = [
    "Date",
    "Product",
    "Unit Amount",
    "Quantity",
    "Total",
    "Client",
    "Payment",
    "Category",
    "Notes",
];

/// Renders `sales` as CSV text with a header row and one row per sale, in the given order.
pub fn to_csv<'a>(sales: impl IntoIterator<Item = &'a SaleRecord>) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    writer
        .write_record(HEADERS)
        .context("Unable to write CSV header")?;
    for sale in sales {
        writer
            .write_record(row(sale))
            .with_context(|| format!("Unable to write CSV row for sale {}", sale.id()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish CSV output: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// The default file name for an export made on `today`, e.g. `sales-2024-01-05.csv`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("sales-{}.csv", today.format("%Y-%m-%d"))
}

fn row(sale: &SaleRecord) -> [String; 9] {
    [
        sale.date().to_string(),
        clean(sale.product()),
        sale.unit_amount().to_string(),
        sale.quantity().to_string(),
        sale.total().to_string(),
        clean(sale.client().unwrap_or_default()),
        clean(sale.payment()),
        clean(sale.category()),
        clean(sale.notes().unwrap_or_default()),
    ]
}

fn clean(value: &str) -> String {
    value
        .replace(DELIMITER as char, DELIMITER_PLACEHOLDER)
        .replace(['\r', '\n'], " ")
}
