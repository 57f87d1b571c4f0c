use async_trait::async_trait;

use crate::{
    errors::{DeleteError, GetError, PutError, QueryError},
    User,
};

mod primary_key;
pub use primary_key::*;

/// The operations the handlers need from a user directory.
///
/// Implemented by [`DirectoryTable`](crate::DirectoryTable) for every table
/// backend, and by test doubles.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Strongly-consistent read by id. `Ok(None)` when no record exists.
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, GetError>;

    /// Eventually-consistent lookup through the email index.
    ///
    /// `Ok(None)` when nothing matches. More than one match is reported as
    /// [`QueryError::IntegrityViolation`] rather than resolved.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, QueryError>;

    /// Unconditional write. Returns the record as stored.
    async fn put(&self, user: User) -> Result<User, PutError>;

    /// Unconditional delete. Deleting an id that does not exist succeeds.
    async fn delete(&self, id: &str) -> Result<String, DeleteError>;
}
