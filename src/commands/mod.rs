//! Command handlers for the salebook CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler loads what it
//! needs, performs one operation and returns an `Out` describing the result.

mod delete;
mod export;
mod init;
mod insert;
mod price;
mod query;
mod update;

use crate::model::SaleRecord;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use delete::delete_sale;
pub use export::export;
pub use init::init;
pub use insert::add_sale;
pub use price::price;
pub use query::{chart, list_sales, summary, ChartPoint, ChartSeries, ChartValue};
pub use update::update_sale;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// The local calendar date.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "1 sale" / "3 sales".
fn plural(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", if count == 1 { "" } else { "s" })
}

/// One line describing a sale, for command output.
fn describe(sale: &SaleRecord, label: &str) -> String {
    let mut line = format!(
        "#{}  {}  {}  {} x {} = {}  [{} / {}]",
        sale.id(),
        sale.date(),
        sale.product(),
        sale.quantity(),
        sale.unit_amount().display_with(label),
        sale.total().display_with(label),
        sale.payment(),
        sale.category(),
    );
    if let Some(client) = sale.client() {
        line.push_str(&format!("  client: {client}"));
    }
    if let Some(notes) = sale.notes() {
        line.push_str(&format!("  notes: {notes}"));
    }
    line
}
