use serde::{Deserialize, Serialize};

/// The business issuing invoices.
///
/// There is exactly one profile per state file. It is overwritten in place
/// and never deleted; a fresh state starts with placeholder values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Enter Name".to_string(),
            email: "email@example.com".to_string(),
            address: "Your Address".to_string(),
        }
    }
}

/// Input for replacing the profile. Every field is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileInput {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl From<UpdateProfileInput> for Profile {
    fn from(input: UpdateProfileInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            address: input.address,
        }
    }
}
