//! Freelance billing: a business profile, a client registry, a ledger of
//! billable work, and invoices derived from that ledger.

pub mod billing;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
pub mod workbook;

pub use error::{BillingError, StoreError};
pub use workbook::Workbook;
