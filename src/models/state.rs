use serde::{Deserialize, Serialize};

use super::{ClientRegistry, Profile, WorkLedger};

/// Everything the suite persists, read and written as a single blob.
///
/// Missing sections load as their defaults, so an empty object is a valid
/// state. Older files store the profile under `"me"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingState {
    #[serde(alias = "me")]
    pub profile: Profile,
    pub clients: ClientRegistry,
    pub logs: WorkLedger,
}
