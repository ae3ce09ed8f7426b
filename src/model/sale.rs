use crate::error::{LedgerError, LedgerResult};
use crate::model::Amount;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// The identity of a sale. Assigned once when the sale is added and never changed.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(u64);

impl SaleId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for SaleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for SaleId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for SaleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single recorded sale.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SaleRecord {
    pub(crate) id: SaleId,
    pub(crate) product: String,
    pub(crate) unit_amount: Amount,
    #[serde(default = "default_quantity")]
    pub(crate) quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) client: Option<String>,
    pub(crate) date: NaiveDate,
    pub(crate) payment: String,
    pub(crate) category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

fn default_quantity() -> u32 {
    1
}

impl SaleRecord {
    /// Builds a stored record from validated input.
    pub(crate) fn from_input(id: SaleId, created_at: DateTime<Utc>, input: SaleInput) -> Self {
        let SaleInput {
            product,
            unit_amount,
            quantity,
            client,
            date,
            payment,
            category,
            notes,
        } = input;
        Self {
            id,
            product,
            unit_amount,
            quantity: quantity.unwrap_or(1),
            client,
            date,
            payment,
            category,
            notes,
            created_at,
        }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn unit_amount(&self) -> Amount {
        self.unit_amount
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn payment(&self) -> &str {
        &self.payment
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `unit_amount * quantity`. Derived on every call, never stored.
    pub fn total(&self) -> Amount {
        self.unit_amount * self.quantity
    }

    /// The `YYYY-MM` month bucket of the sale date.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Checks a record read back from storage.
    pub(crate) fn check(&self) -> LedgerResult<()> {
        check_fields(self.product.trim(), self.unit_amount, self.quantity)
    }

    /// Returns the mutable fields of this record as an input, e.g. to pre-fill an edit.
    pub fn to_input(&self) -> SaleInput {
        SaleInput {
            product: self.product.clone(),
            unit_amount: self.unit_amount,
            quantity: Some(self.quantity),
            client: self.client.clone(),
            date: self.date,
            payment: self.payment.clone(),
            category: self.category.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// The caller-supplied fields of a sale, i.e. everything except `id` and `created_at`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SaleInput {
    pub product: String,
    pub unit_amount: Amount,
    /// Defaults to 1 when absent.
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub client: Option<String>,
    pub date: NaiveDate,
    pub payment: String,
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SaleInput {
    /// Creates an input with the required fields; the optional ones start out absent.
    pub fn new(
        product: impl Into<String>,
        unit_amount: impl Into<Amount>,
        date: NaiveDate,
        payment: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            unit_amount: unit_amount.into(),
            quantity: None,
            client: None,
            date,
            payment: payment.into(),
            category: category.into(),
            notes: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Trims text fields, drops blank optional fields and checks the record invariants.
    pub(crate) fn normalize(self) -> LedgerResult<SaleInput> {
        let product = self.product.trim().to_string();
        let quantity = self.quantity.unwrap_or(1);
        check_fields(&product, self.unit_amount, quantity)?;
        Ok(SaleInput {
            product,
            unit_amount: self.unit_amount,
            quantity: Some(quantity),
            client: non_blank(self.client),
            date: self.date,
            payment: self.payment.trim().to_string(),
            category: self.category.trim().to_string(),
            notes: non_blank(self.notes),
        })
    }
}

/// The invariants every stored sale holds.
fn check_fields(product: &str, unit_amount: Amount, quantity: u32) -> LedgerResult<()> {
    if product.is_empty() {
        return Err(LedgerError::validation("product must not be empty"));
    }
    if !unit_amount.is_positive() {
        return Err(LedgerError::validation(format!(
            "unit amount must be greater than zero, got {unit_amount}"
        )));
    }
    if quantity == 0 {
        return Err(LedgerError::validation(
            "quantity must be greater than zero",
        ));
    }
    if unit_amount.checked_mul(quantity).is_none() {
        return Err(LedgerError::validation(format!(
            "total of {quantity} x {unit_amount} is too large"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
