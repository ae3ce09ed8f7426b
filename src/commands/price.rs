//! Price command handler.

use crate::args::PriceArgs;
use crate::commands::Out;
use crate::model::Amount;
use crate::{Config, Result};
use anyhow::ensure;
use tracing::debug;

/// Looks up the default unit price for a product, or stores one when `--set` is given.
///
/// # Errors
///
/// - Returns an error if the product is blank or the price to set is not greater than zero.
/// - Returns an error if `config.json` cannot be written.
pub async fn price(mut config: Config, args: PriceArgs) -> Result<Out<Option<Amount>>> {
    let product = args.product().trim();
    let label = config.currency_label().to_string();

    if let Some(amount) = args.set() {
        ensure!(!product.is_empty(), "A product name is required to set a price");
        ensure!(
            amount.is_positive(),
            "The price of '{product}' must be greater than zero, got {amount}"
        );
        let mut hints = config.price_hints().clone();
        let previous = hints.insert(product, amount);
        debug!("Replacing price hint {previous:?} for '{product}'");
        config.set_price_hints(hints).await?;
        let message = format!(
            "Set the price of '{product}' to {}",
            amount.display_with(&label)
        );
        return Ok(Out::new(message, Some(amount)));
    }

    let found = config.price_hints().lookup(product);
    let message = match found {
        Some(amount) => format!(
            "The price of '{product}' is {}",
            amount.display_with(&label)
        ),
        None => format!("There is no price for '{product}'"),
    };
    Ok(Out::new(message, found))
}
