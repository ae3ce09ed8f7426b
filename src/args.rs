//! These structs provide the CLI interface for the salebook CLI.

use crate::model::{Amount, SaleFilter, SaleId};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// salebook: record point-of-sale transactions and report on them.
///
/// Sales are kept in a local data directory. Every change is written back immediately, and the
/// summary, list, chart and export commands read the current sales on each run.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and an initial config.json.
    Init,
    /// Record a new sale.
    Add(AddArgs),
    /// Change an existing sale. Options that are not given keep their current values.
    Update(UpdateArgs),
    /// Delete a sale.
    Delete(DeleteArgs),
    /// List sales, newest first, optionally filtered.
    List(ListArgs),
    /// Show sale count, revenue totals, the average sale and the most recent sales.
    Summary(SummaryArgs),
    /// Show revenue grouped by month, payment method, category or day.
    Chart(ChartArgs),
    /// Write the (optionally filtered) sales to a CSV file.
    Export(ExportArgs),
    /// Look up or set the default unit price of a product.
    Price(PriceArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where salebook data and configuration is held. Defaults to ~/salebook
    #[arg(long, env = "SALEBOOK_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// The fields of a sale as given on the command line.
#[derive(Debug, Default, Parser, Clone)]
pub struct SaleFields {
    /// The product sold.
    #[arg(long)]
    pub(crate) product: Option<String>,

    /// The unit price, e.g. 170 or "Rs. 1,250.50". When adding a sale this falls back to the
    /// configured price hint for the product.
    #[arg(long)]
    pub(crate) amount: Option<Amount>,

    /// How many units were sold. Defaults to 1.
    #[arg(long)]
    pub(crate) quantity: Option<u32>,

    /// The customer, if known.
    #[arg(long)]
    pub(crate) client: Option<String>,

    /// The sale date as YYYY-MM-DD. Defaults to today when adding a sale.
    #[arg(long)]
    pub(crate) date: Option<NaiveDate>,

    /// The payment method, e.g. cash or card.
    #[arg(long)]
    pub(crate) payment: Option<String>,

    /// The product category.
    #[arg(long)]
    pub(crate) category: Option<String>,

    /// Free-form notes.
    #[arg(long)]
    pub(crate) notes: Option<String>,
}

impl SaleFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<Amount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn payment(mut self, payment: impl Into<String>) -> Self {
        self.payment = Some(payment.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Args for the `salebook add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[clap(flatten)]
    fields: SaleFields,
}

impl AddArgs {
    pub fn new(fields: SaleFields) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &SaleFields {
        &self.fields
    }
}

/// Args for the `salebook update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the sale to change.
    id: SaleId,

    #[clap(flatten)]
    fields: SaleFields,
}

impl UpdateArgs {
    pub fn new(id: SaleId, fields: SaleFields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn fields(&self) -> &SaleFields {
        &self.fields
    }
}

/// Args for the `salebook delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the sale to delete.
    id: SaleId,
}

impl DeleteArgs {
    pub fn new(id: SaleId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }
}

/// Filter options shared by `list` and `export`.
#[derive(Debug, Default, Parser, Clone)]
pub struct FilterArgs {
    /// Only sales whose product, client or payment contains this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// Only sales in exactly this category.
    #[arg(long)]
    category: Option<String>,

    /// Only sales on or after this date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only sales on or before this date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn new(
        search: Option<String>,
        category: Option<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        Self {
            search,
            category,
            from,
            to,
        }
    }

    pub fn to_filter(&self) -> SaleFilter {
        SaleFilter {
            search_text: self.search.clone(),
            category: self.category.clone(),
            start_date: self.from,
            end_date: self.to,
        }
    }
}

/// Args for the `salebook list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    filter: FilterArgs,
}

impl ListArgs {
    pub fn new(filter: FilterArgs) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> SaleFilter {
        self.filter.to_filter()
    }
}

/// Args for the `salebook summary` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct SummaryArgs {
    /// The date counted as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl SummaryArgs {
    pub fn new(today: Option<NaiveDate>) -> Self {
        Self { today }
    }

    pub fn today(&self) -> Option<NaiveDate> {
        self.today
    }
}

/// The grouping used by `salebook chart`.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Revenue per YYYY-MM month.
    #[default]
    Month,
    /// Revenue per payment method.
    Payment,
    /// Revenue per category.
    Category,
    /// Revenue per day for the most recent days with sales.
    Day,
    /// Number of sales per payment method.
    PaymentCount,
}

serde_plain::derive_display_from_serialize!(ChartKind);
serde_plain::derive_fromstr_from_deserialize!(ChartKind);

/// Args for the `salebook chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// What to group by.
    #[arg(value_enum, default_value_t = ChartKind::Month)]
    kind: ChartKind,

    /// For `day`: how many of the most recent days with sales to show. Defaults to the
    /// configured day window.
    #[arg(long)]
    limit: Option<usize>,
}

impl ChartArgs {
    pub fn new(kind: ChartKind, limit: Option<usize>) -> Self {
        Self { kind, limit }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Args for the `salebook export` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ExportArgs {
    #[clap(flatten)]
    filter: FilterArgs,

    /// Where to write the CSV. Defaults to $SALEBOOK_HOME/exports/sales-YYYY-MM-DD.csv
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(filter: FilterArgs, output: Option<PathBuf>) -> Self {
        Self { filter, output }
    }

    pub fn filter(&self) -> SaleFilter {
        self.filter.to_filter()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// Args for the `salebook price` command.
#[derive(Debug, Parser, Clone)]
pub struct PriceArgs {
    /// The product name. Matching ignores case and extra spaces.
    product: String,

    /// Store this as the product's default unit price.
    #[arg(long)]
    set: Option<Amount>,
}

impl PriceArgs {
    pub fn new(product: impl Into<String>, set: Option<Amount>) -> Self {
        Self {
            product: product.into(),
            set,
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn set(&self) -> Option<Amount> {
        self.set
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("salebook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SALEBOOK_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("salebook")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
