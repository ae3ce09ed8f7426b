//! Types that represent the core data model, such as `SaleRecord` and `SaleFilter`.
mod amount;
mod filter;
mod sale;

pub use amount::{Amount, AmountError};
pub use filter::SaleFilter;
pub use sale::{SaleId, SaleInput, SaleRecord};
