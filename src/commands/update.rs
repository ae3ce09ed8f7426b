//! Update command handler.

use crate::args::{SaleFields, UpdateArgs};
use crate::commands::{describe, Out};
use crate::error::LedgerError;
use crate::model::{SaleInput, SaleRecord};
use crate::{Config, Result};

/// Updates a sale and saves the ledger.
///
/// The sale's current values are used for any option that is not given, then the whole sale is
/// replaced. The id and creation time never change. Passing an empty `--client` or `--notes`
/// clears that field.
///
/// # Errors
///
/// - Returns a `LedgerError::NotFound` if no sale has the id.
/// - Returns a `LedgerError::Validation` if the resulting sale is invalid.
/// - Returns an error if the ledger cannot be loaded or saved.
pub async fn update_sale(config: Config, args: UpdateArgs) -> Result<Out<SaleRecord>> {
    let id = args.id();
    let mut ledger = config.open_ledger().await?;
    let current = ledger
        .ledger()
        .get_sale(id)
        .ok_or(LedgerError::NotFound(id))?
        .to_input();

    let input = merge(current, args.fields());
    let record = ledger.update_sale(id, input).await?;

    let message = format!(
        "Updated sale {}",
        describe(&record, config.currency_label())
    );
    Ok(Out::new(message, record))
}

/// Overlays the given fields onto `current`.
fn merge(current: SaleInput, fields: &SaleFields) -> SaleInput {
    let fields = fields.clone();
    SaleInput {
        product: fields.product.unwrap_or(current.product),
        unit_amount: fields.amount.unwrap_or(current.unit_amount),
        quantity: fields.quantity.or(current.quantity),
        client: fields.client.or(current.client),
        date: fields.date.unwrap_or(current.date),
        payment: fields.payment.unwrap_or(current.payment),
        category: fields.category.unwrap_or(current.category),
        notes: fields.notes.or(current.notes),
    }
}
