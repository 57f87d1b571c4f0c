//! A user directory on a single DynamoDB table.
//!
//! Records are stored one item per user under `_pk = "user/<id>"`,
//! `_sk = "<id>"`, with a global secondary index on `_gsi1 = "email/<email>"`
//! for lookups by address. [`DirectoryTable`] implements [`DirectoryStore`] on
//! top of any [`TableBackend`]; the [`handlers`] expose it over Lambda and the
//! [`client`] calls it with SigV4-signed requests.
//!
//! Email uniqueness is only checked, never enforced: the create handler reads
//! the (eventually consistent) email index before writing, and concurrent
//! creates for the same address can both succeed. A later `get_by_email`
//! reports the duplicate as [`QueryError::IntegrityViolation`].

pub mod client;
pub mod config;
pub mod directory_table;
pub mod errors;
pub mod handlers;
pub mod traits;
mod user;

pub use directory_table::{DirectoryTable, DynamoBackend, IndexMode, MemoryBackend, TableBackend};
pub use errors::{
    ClientError, DeleteError, Error, GetError, PutError, QueryError, UserApiError,
};
pub use traits::DirectoryStore;
pub use user::{DeletedUser, User};
