//! Persistence for [`BillingState`].
//!
//! The whole state is loaded and saved as one blob. [`JsonFileStore`] is the
//! on-disk store used by the binary; [`MemoryStore`] backs tests.

mod json;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub use json::JsonFileStore;

use crate::error::StoreError;
use crate::models::BillingState;

/// Load/save capability injected into a [`crate::workbook::Workbook`].
pub trait StateStore {
    /// Load the stored state, or defaults if nothing has been stored yet.
    fn load(&self) -> Result<BillingState, StoreError>;

    /// Replace the stored state.
    fn save(&self, state: &BillingState) -> Result<(), StoreError>;

    /// Load, apply `f`, and save if `f` succeeds.
    ///
    /// Stores that can be shared between processes override this to hold
    /// exclusive access for the whole transaction.
    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut BillingState) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut state = self.load()?;
        let out = f(&mut state)?;
        self.save(&state)?;
        Ok(out)
    }
}

/// In-memory store. Counts saves so tests can assert on persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<BillingState>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: BillingState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the last saved state.
    pub fn snapshot(&self) -> BillingState {
        self.state.lock().expect("memory store lock poisoned").clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<BillingState, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &BillingState) -> Result<(), StoreError> {
        *self.state.lock().expect("memory store lock poisoned") = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
