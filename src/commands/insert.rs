//! Insert command handler.

use crate::args::AddArgs;
use crate::commands::{describe, today, Out};
use crate::model::{SaleInput, SaleRecord};
use crate::{Config, Result};
use anyhow::Context;

pub(crate) const DEFAULT_PAYMENT: &str = "cash";
pub(crate) const DEFAULT_CATEGORY: &str = "general";

/// Records a new sale and saves the ledger.
///
/// A unique id and the creation time are assigned by the ledger. Options that are not given take
/// defaults: the amount comes from the configured price hint for the product, the quantity is 1,
/// the date is today, the payment is `cash` and the category is `general`.
///
/// # Errors
///
/// - Returns an error if no product is given, or if no amount is given and there is no price hint.
/// - Returns a `LedgerError::Validation` if the sale is invalid, e.g. a non-positive amount.
/// - Returns an error if the ledger cannot be loaded or saved.
pub async fn add_sale(config: Config, args: AddArgs) -> Result<Out<SaleRecord>> {
    let fields = args.fields();
    let product = fields
        .product
        .clone()
        .context("A product is required to add a sale")?;
    let unit_amount = match fields.amount {
        Some(amount) => amount,
        None => config.price_hints().lookup(&product).with_context(|| {
            format!("No amount was given and there is no price hint for '{product}'")
        })?,
    };

    let input = SaleInput {
        product,
        unit_amount,
        quantity: fields.quantity,
        client: fields.client.clone(),
        date: fields.date.unwrap_or_else(today),
        payment: fields
            .payment
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT.to_string()),
        category: fields
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        notes: fields.notes.clone(),
    };

    let mut ledger = config.open_ledger().await?;
    let record = ledger.add_sale(input).await?;

    let message = format!(
        "Added sale {}",
        describe(&record, config.currency_label())
    );
    Ok(Out::new(message, record))
}
