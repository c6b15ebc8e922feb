use serde::Serialize;

use super::{Client, Profile, WorkEntry};

/// A billing statement for one client.
///
/// Derived from the ledger on request and never stored. `grand_total` is the
/// left-to-right sum of `line_items[i].total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub issuer: Profile,
    pub bill_to: Client,
    pub line_items: Vec<WorkEntry>,
    pub grand_total: f64,
}
