use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directory entry. The only entity this crate stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }

    /// Create a record for `email` with a freshly generated id.
    ///
    /// Ids are random v4 UUIDs and are never reassigned once a record exists.
    pub fn register(email: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), email)
    }
}

/// Confirmation body returned by the delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedUser {
    pub id: String,
}
