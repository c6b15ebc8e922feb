use chrono::{Local, NaiveDate};

use crate::billing::DuplicateClientPolicy;
use crate::error::{BillingError, StoreError};
use crate::models::*;
use crate::store::StateStore;

/// Billing state bound to the store it is persisted in.
///
/// Reads use the cached state. Every mutation runs through
/// [`StateStore::update`], so it is applied to freshly loaded state and
/// saved only if it succeeds.
pub struct Workbook<S: StateStore> {
    store: S,
    state: BillingState,
    duplicate_clients: DuplicateClientPolicy,
}

impl<S: StateStore> Workbook<S> {
    pub fn open(store: S) -> Result<Self, StoreError> {
        let state = store.load()?;
        Ok(Self {
            store,
            state,
            duplicate_clients: DuplicateClientPolicy::default(),
        })
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateClientPolicy) -> Self {
        self.duplicate_clients = policy;
        self
    }

    pub fn set_duplicate_policy(&mut self, policy: DuplicateClientPolicy) {
        self.duplicate_clients = policy;
    }

    pub fn state(&self) -> &BillingState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut BillingState) -> Result<T, BillingError>,
    ) -> Result<T, BillingError> {
        let mut updated = None;
        let out = self.store.update(|state| {
            let out = op(state)?;
            updated = Some(state.clone());
            Ok::<T, BillingError>(out)
        })?;
        if let Some(state) = updated {
            self.state = state;
        }
        Ok(out)
    }

    // ============================================================
    // Profile
    // ============================================================

    pub fn profile(&self) -> &Profile {
        &self.state.profile
    }

    pub fn set_profile(&mut self, input: UpdateProfileInput) -> Result<(), BillingError> {
        self.mutate(|state| {
            state.set_profile(input);
            Ok(())
        })?;
        tracing::info!("Updated business profile");
        Ok(())
    }

    // ============================================================
    // Clients
    // ============================================================

    pub fn add_client(&mut self, input: AddClientInput) -> Result<Client, BillingError> {
        let policy = self.duplicate_clients;
        let client = self.mutate(|state| state.add_client(input, policy))?;
        tracing::info!("Saved client {} ({})", client.id, client.name);
        Ok(client)
    }

    /// Registered clients in insertion order.
    pub fn list_clients(&self) -> Vec<&Client> {
        self.state.clients.iter().collect()
    }

    pub fn client_exists(&self, id: &str) -> bool {
        self.state.clients.contains(id)
    }

    // ============================================================
    // Work ledger
    // ============================================================

    /// Record work dated today.
    pub fn log_work(&mut self, input: LogWorkInput) -> Result<WorkEntry, BillingError> {
        self.log_work_on(input, Local::now().date_naive())
    }

    pub fn log_work_on(
        &mut self,
        input: LogWorkInput,
        date: NaiveDate,
    ) -> Result<WorkEntry, BillingError> {
        let entry = self.mutate(|state| state.log_work(input, date))?;
        tracing::info!(
            "Logged {} h for {} on {}",
            entry.hours,
            entry.client_id,
            entry.date
        );
        Ok(entry)
    }

    pub fn entries_for_client<'a>(&'a self, client_id: &'a str) -> Vec<&'a WorkEntry> {
        self.state.entries_for_client(client_id)
    }

    // ============================================================
    // Invoices
    // ============================================================

    pub fn build_invoice(&self, client_id: &str) -> Result<Invoice, BillingError> {
        self.state.build_invoice(client_id)
    }
}
