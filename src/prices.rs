//! Default unit prices looked up by product name.
//!
//! Price hints only pre-fill the amount for a new sale when the user does not give one. They are
//! never checked against recorded sales.

use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product name → default unit price table.
///
/// Lookups ignore case and collapse runs of whitespace, so `" Printed  Tee"` finds `"printed tee"`.
/// Names that normalize to the same key keep the last price given.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Amount>", into = "BTreeMap<String, Amount>")]
pub struct PriceHints {
    prices: BTreeMap<String, Amount>,
}

impl PriceHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overrides the price for `product`.
    pub fn insert(&mut self, product: &str, price: Amount) -> Option<Amount> {
        self.prices.insert(normalize(product), price)
    }

    /// Returns the hinted price for `product`, if any.
    pub fn lookup(&self, product: &str) -> Option<Amount> {
        self.prices.get(&normalize(product)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

impl From<BTreeMap<String, Amount>> for PriceHints {
    fn from(raw: BTreeMap<String, Amount>) -> Self {
        let mut hints = PriceHints::new();
        for (product, price) in raw {
            hints.insert(&product, price);
        }
        hints
    }
}

impl From<PriceHints> for BTreeMap<String, Amount> {
    fn from(hints: PriceHints) -> Self {
        hints.prices
    }
}

fn normalize(product: &str) -> String {
    product
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
