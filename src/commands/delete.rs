//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::{describe, Out};
use crate::model::SaleRecord;
use crate::{Config, Result};

/// Deletes a sale by id and saves the ledger.
///
/// # Errors
///
/// - Returns a `LedgerError::NotFound` if no sale has the id, including when it was already
///   deleted.
/// - Returns an error if the ledger cannot be loaded or saved.
pub async fn delete_sale(config: Config, args: DeleteArgs) -> Result<Out<SaleRecord>> {
    let mut ledger = config.open_ledger().await?;
    let deleted = ledger.delete_sale(args.id()).await?;
    let message = format!(
        "Deleted sale {}",
        describe(&deleted, config.currency_label())
    );
    Ok(Out::new(message, deleted))
}
