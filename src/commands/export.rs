//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::{plural, today, Out};
use crate::export::{export_file_name, to_csv};
use crate::{utils, Config, Result};
use anyhow::bail;
use std::path::PathBuf;
use tracing::debug;

/// Writes the sales matching the filter to a CSV file, newest date first.
///
/// The file goes to `--output` if given, otherwise to `exports/sales-YYYY-MM-DD.csv` under the
/// home directory. An existing file at that path is overwritten.
///
/// # Errors
///
/// - Returns an error if no sales match, in which case no file is written.
/// - Returns an error if the file cannot be written.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let ledger = config.open_ledger().await?;
    let sales = ledger.list_sales(&args.filter());
    if sales.is_empty() {
        bail!("No sales data to export")
    }
    let count = sales.len();
    let csv = to_csv(sales)?;

    let path = match args.output() {
        Some(output) => output.to_path_buf(),
        None => config.exports().join(export_file_name(today())),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        utils::make_dir(parent).await?;
    }
    debug!("Writing {} bytes of CSV", csv.len());
    utils::write(&path, csv).await?;

    let message = format!("Exported {} to {}", plural(count, "sale"), path.display());
    Ok(Out::new(message, path))
}
