use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A client that work is billed to.
///
/// The `id` is chosen by the user (e.g. `C1`) and is the key work entries
/// refer to. On disk the id is the map key, so only `name` and `email` are
/// stored in the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Input for adding a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddClientInput {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<AddClientInput> for Client {
    fn from(input: AddClientInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            email: input.email,
        }
    }
}

/// Clients keyed by id, kept in insertion order.
///
/// Serializes as a JSON object `{id: {name, email}}`; key order in the file
/// is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientRegistry {
    clients: Vec<Client>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Insert a client, replacing any record with the same id in place.
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, client: Client) -> Option<Client> {
        match self.clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => Some(std::mem::replace(existing, client)),
            None => {
                self.clients.push(client);
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[derive(Serialize)]
struct ClientValueRef<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct ClientValue {
    name: String,
    email: String,
}

impl Serialize for ClientRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.clients.iter().map(|c| {
            (
                c.id.as_str(),
                ClientValueRef {
                    name: &c.name,
                    email: &c.email,
                },
            )
        }))
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = ClientRegistry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of client id to {name, email}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut registry = ClientRegistry::new();
        while let Some((id, value)) = map.next_entry::<String, ClientValue>()? {
            registry.upsert(Client {
                id,
                name: value.name,
                email: value.email,
            });
        }
        Ok(registry)
    }
}

impl<'de> Deserialize<'de> for ClientRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor)
    }
}
