//! Persistence of the ledger through a key/text storage collaborator.
//!
//! The ledger is loaded once when a `StoredLedger` is opened and the whole ledger is rewritten
//! after every successful mutation. There is no incremental persistence.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::LedgerResult;
use crate::ledger::{Buckets, DashboardSummary, Ledger};
use crate::model::{SaleFilter, SaleId, SaleInput, SaleRecord};
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// The key under which sales are stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "sales";

/// A key/text store. Implementations decide where the text lives.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the text stored under `key`, or `None` if nothing has been stored yet.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces whatever is stored under `key` with `text`.
    async fn save(&self, key: &str, text: &str) -> Result<()>;
}

/// A `Ledger` bound to the store it was loaded from.
#[derive(Debug)]
pub struct StoredLedger<S: Store> {
    store: S,
    key: String,
    ledger: Ledger,
}

impl<S: Store> StoredLedger<S> {
    /// Loads the ledger stored under `key`. Missing or corrupt data opens as an empty ledger.
    pub async fn open(store: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let text = store
            .load(&key)
            .await
            .with_context(|| format!("Unable to load sales stored under '{key}'"))?;
        let ledger = Ledger::deserialize(text.as_deref());
        debug!("Opened ledger '{key}' with {} sales", ledger.len());
        Ok(Self { store, key, ledger })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a sale and persists the ledger.
    pub async fn add_sale(&mut self, input: SaleInput) -> Result<SaleRecord> {
        self.mutate(|ledger| ledger.add_sale(input)).await
    }

    /// Replaces sale `id` and persists the ledger.
    pub async fn update_sale(&mut self, id: SaleId, input: SaleInput) -> Result<SaleRecord> {
        self.mutate(|ledger| ledger.update_sale(id, input)).await
    }

    /// Deletes sale `id` and persists the ledger.
    pub async fn delete_sale(&mut self, id: SaleId) -> Result<SaleRecord> {
        self.mutate(|ledger| ledger.delete_sale(id)).await
    }

    pub fn list_sales(&self, filter: &SaleFilter) -> Vec<&SaleRecord> {
        self.ledger.list_sales(filter)
    }

    pub fn dashboard_summary(&self, today: NaiveDate, recent: usize) -> DashboardSummary {
        self.ledger.dashboard_summary_with(today, recent)
    }

    pub fn aggregate_by_month(&self) -> Buckets {
        self.ledger.aggregate_by_month()
    }

    pub fn aggregate_by_payment(&self) -> Buckets {
        self.ledger.aggregate_by_payment()
    }

    pub fn aggregate_by_category(&self) -> Buckets {
        self.ledger.aggregate_by_category()
    }

    pub fn aggregate_by_day(&self, limit: usize) -> Buckets {
        self.ledger.aggregate_by_day(limit)
    }

    pub fn count_by_payment(&self) -> BTreeMap<String, usize> {
        self.ledger.count_by_payment()
    }

    /// Applies `f` to a copy of the ledger, saves the copy and only then makes it current, so a
    /// failed save leaves memory matching what is stored.
    async fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> LedgerResult<T>,
    {
        let mut next = self.ledger.clone();
        let out = f(&mut next)?;
        let text = next.serialize()?;
        self.store
            .save(&self.key, &text)
            .await
            .with_context(|| format!("Unable to save sales under '{}'", self.key))?;
        debug!("Saved {} sales under '{}'", next.len(), self.key);
        self.ledger = next;
        Ok(out)
    }
}
