//! Names of the storage-internal attributes on every directory item.
//!
//! These never appear on a [`User`](crate::User): they are added when a record
//! is written and stripped again when it is read.

/// Partition key attribute.
pub const PARTITION_KEY: &str = "_pk";

/// Sort key attribute.
pub const SORT_KEY: &str = "_sk";

/// Partition key attribute of the email index.
pub const EMAIL_INDEX_KEY: &str = "_gsi1";

/// Default name of the global secondary index keyed on [`EMAIL_INDEX_KEY`].
pub const DEFAULT_EMAIL_INDEX: &str = "gsi1";

/// Every attribute the table adds for its own bookkeeping.
pub const INTERNAL: [&str; 3] = [PARTITION_KEY, SORT_KEY, EMAIL_INDEX_KEY];

/// Whether a stored attribute is one of [`INTERNAL`]. Profile attributes that
/// merely look like key names, such as `pk`, are not.
pub fn is_internal(name: &str) -> bool {
    INTERNAL.contains(&name)
}
