pub mod attribute_name;
mod dynamo;
mod memory;
mod table_entry;

pub use self::{
    dynamo::DynamoBackend,
    memory::{IndexMode, MemoryBackend},
    table_entry::{Item, TableEntry},
};

use async_trait::async_trait;
use log::{error, info};

use self::attribute_name::{DEFAULT_EMAIL_INDEX, EMAIL_INDEX_KEY};
use crate::{
    errors::{DeleteError, GetError, PutError, QueryError},
    traits::{email_index_key, DirectoryStore, PrimaryKeyParts},
    User,
};

/// Item-level access to the table backing a [`DirectoryTable`].
///
/// Implementations do no key construction of their own; they receive complete
/// key maps and items.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Strongly-consistent read of a single item. `Ok(None)` if it is absent.
    async fn get_item(&self, key: Item) -> Result<Option<Item>, GetError>;

    /// All items whose `attribute` equals `value` in the secondary index
    /// `index_name`.
    async fn query_index(
        &self,
        index_name: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<Item>, QueryError>;

    async fn put_item(&self, item: Item) -> Result<(), PutError>;

    async fn delete_item(&self, key: Item) -> Result<(), DeleteError>;
}

/// The user directory: one table, one item per user, and a secondary index
/// for lookups by email.
#[derive(Debug)]
pub struct DirectoryTable<B = DynamoBackend> {
    backend: B,
    email_index: String,
}

impl<B: TableBackend> DirectoryTable<B> {
    pub fn new(backend: B) -> Self {
        Self::with_email_index(backend, DEFAULT_EMAIL_INDEX)
    }

    pub fn with_email_index(backend: B, email_index: impl Into<String>) -> Self {
        Self {
            backend,
            email_index: email_index.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn email_index(&self) -> &str {
        &self.email_index
    }
}

#[async_trait]
impl<B: TableBackend> DirectoryStore for DirectoryTable<B> {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, GetError> {
        let key = PrimaryKeyParts::for_user(id).into_key();

        let Some(item) = self.backend.get_item(key).await? else {
            return Ok(None);
        };

        Ok(Some(TableEntry::read_user(item)?))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, QueryError> {
        let mut items = self
            .backend
            .query_index(&self.email_index, EMAIL_INDEX_KEY, &email_index_key(email))
            .await?;

        match items.len() {
            0 => Ok(None),
            1 => {
                let item = items.remove(0);
                Ok(Some(TableEntry::read_user(item)?))
            }
            matches => {
                error!("found {matches} records sharing the email index key for {email}");
                Err(QueryError::IntegrityViolation {
                    email: email.to_string(),
                    matches,
                })
            }
        }
    }

    async fn put(&self, user: User) -> Result<User, PutError> {
        let item = TableEntry::from_user(&user)?.into_item();

        self.backend.put_item(item).await?;
        info!("stored user {}", user.id);

        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<String, DeleteError> {
        let key = PrimaryKeyParts::for_user(id).into_key();

        self.backend.delete_item(key).await?;
        info!("deleted user {id}");

        Ok(id.to_string())
    }
}
