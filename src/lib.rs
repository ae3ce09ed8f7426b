//! salebook records point-of-sale transactions in a local ledger and reports on them.
//!
//! The core is `ledger::Ledger`, an in-memory collection of `model::SaleRecord` values with
//! filtering, a dashboard summary and revenue aggregates. `store::StoredLedger` binds a ledger to
//! a `store::Store` and writes the whole ledger back after every change.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod ledger;
pub mod model;
pub mod prices;
pub mod store;
mod utils;


pub use config::Config;
pub use error::{Error, LedgerError, LedgerResult, Result};
pub use ledger::{DashboardSummary, Ledger};
