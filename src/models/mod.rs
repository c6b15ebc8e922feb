//! Domain models for the freelance suite.
//!
//! # Core Concepts
//!
//! ## Persisted State
//!
//! - [`Profile`]: The business's own identity, printed as the invoice issuer.
//! - [`ClientRegistry`]: Clients keyed by a user-chosen id, in insertion order.
//! - [`WorkLedger`]: Append-only log of billable [`WorkEntry`] records.
//! - [`BillingState`]: All of the above, stored and loaded as one blob.
//!
//! ## Derived Values
//!
//! - [`Invoice`]: One client's line items and grand total. Built on demand,
//!   never persisted.

mod client;
mod entry;
mod invoice;
mod profile;
mod state;

pub use client::*;
pub use entry::*;
pub use invoice::*;
pub use profile::*;
pub use state::*;
