//! Operations on [`BillingState`].
//!
//! These are pure in-memory mutations and reads. Persisting the result is
//! the caller's job; see [`crate::workbook::Workbook`].

mod amount;
mod invoice;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use amount::parse_amount;

use crate::error::BillingError;
use crate::models::*;

/// What `add_client` does when the id is already registered.
///
/// - `Reject`: fail with [`BillingError::DuplicateClient`]
/// - `Overwrite`: replace the existing record in place
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateClientPolicy {
    #[default]
    Reject,
    Overwrite,
}

impl DuplicateClientPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Overwrite => "overwrite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reject" => Some(Self::Reject),
            "overwrite" => Some(Self::Overwrite),
            _ => None,
        }
    }
}

impl BillingState {
    // ============================================================
    // Profile
    // ============================================================

    /// Overwrite all profile fields. Any strings are accepted.
    pub fn set_profile(&mut self, input: UpdateProfileInput) {
        self.profile = input.into();
    }

    // ============================================================
    // Clients
    // ============================================================

    pub fn add_client(
        &mut self,
        input: AddClientInput,
        policy: DuplicateClientPolicy,
    ) -> Result<Client, BillingError> {
        if policy == DuplicateClientPolicy::Reject && self.clients.contains(&input.id) {
            return Err(BillingError::DuplicateClient(input.id));
        }

        let client = Client::from(input);
        self.clients.upsert(client.clone());
        Ok(client)
    }

    pub fn client(&self, id: &str) -> Result<&Client, BillingError> {
        self.clients
            .get(id)
            .ok_or_else(|| BillingError::ClientNotFound(id.to_string()))
    }

    // ============================================================
    // Work ledger
    // ============================================================

    /// Record work for an existing client on `date`.
    ///
    /// The client is checked before hours and rate are parsed.
    pub fn log_work(
        &mut self,
        input: LogWorkInput,
        date: NaiveDate,
    ) -> Result<WorkEntry, BillingError> {
        self.client(&input.client_id)?;
        let hours = parse_amount("hours", &input.hours)?;
        let rate = parse_amount("rate", &input.rate)?;

        let entry = WorkEntry {
            client_id: input.client_id,
            project: input.project,
            task: input.task,
            hours,
            rate,
            total: hours * rate,
            date,
        };
        self.logs.append(entry.clone());
        Ok(entry)
    }

    /// Entries for `client_id` in ledger order.
    pub fn entries_for_client<'a>(&'a self, client_id: &'a str) -> Vec<&'a WorkEntry> {
        self.logs.for_client(client_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn add_acme(state: &mut BillingState) {
        state
            .add_client(
                AddClientInput {
                    id: "C1".to_string(),
                    name: "Acme".to_string(),
                    email: "a@x.com".to_string(),
                },
                DuplicateClientPolicy::Reject,
            )
            .unwrap();
    }

    fn work(client_id: &str, hours: &str, rate: &str) -> LogWorkInput {
        LogWorkInput {
            client_id: client_id.to_string(),
            project: "Site".to_string(),
            task: "Design".to_string(),
            hours: hours.to_string(),
            rate: rate.to_string(),
        }
    }

    #[test]
    fn test_log_work_checks_client_before_numbers() {
        let mut state = BillingState::default();
        let err = state.log_work(work("C9", "abc", "50"), date()).unwrap_err();
        assert!(matches!(err, BillingError::ClientNotFound(id) if id == "C9"));
    }

    #[test]
    fn test_log_work_stores_product_as_total() {
        let mut state = BillingState::default();
        add_acme(&mut state);

        let entry = state.log_work(work("C1", "1.1", "3"), date()).unwrap();

        assert_eq!(entry.total, 1.1 * 3.0);
        assert_eq!(entry.date, date());
        assert_eq!(state.logs.len(), 1);
    }

    #[test]
    fn test_invalid_rate_leaves_ledger_untouched() {
        let mut state = BillingState::default();
        add_acme(&mut state);

        assert!(state.log_work(work("C1", "2", "lots"), date()).is_err());
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_overwrite_policy_replaces_client() {
        let mut state = BillingState::default();
        add_acme(&mut state);

        let client = state
            .add_client(
                AddClientInput {
                    id: "C1".to_string(),
                    name: "Acme Corp".to_string(),
                    email: "billing@acme.com".to_string(),
                },
                DuplicateClientPolicy::Overwrite,
            )
            .unwrap();

        assert_eq!(client.name, "Acme Corp");
        assert_eq!(state.clients.len(), 1);
        assert_eq!(state.client("C1").unwrap().email, "billing@acme.com");
    }

    #[test]
    fn test_policy_round_trips_through_str() {
        for policy in [DuplicateClientPolicy::Reject, DuplicateClientPolicy::Overwrite] {
            assert_eq!(DuplicateClientPolicy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(DuplicateClientPolicy::from_str("merge"), None);
    }
}
