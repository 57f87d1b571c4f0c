//! Storage key construction for user records.
//!
//! Both the write path ([`TableEntry`](crate::directory_table::TableEntry)) and
//! the read paths (`get_by_id`, `get_by_email`, `delete`) build their keys
//! here and nowhere else. A mismatch between the two would not raise an error,
//! lookups would just silently miss.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::directory_table::attribute_name::{PARTITION_KEY, SORT_KEY};

const USER_PREFIX: &str = "user/";
const EMAIL_PREFIX: &str = "email/";

/// Partition key for the record with this id.
pub fn user_partition_key(id: &str) -> String {
    format!("{USER_PREFIX}{id}")
}

/// Sort key for the record with this id.
///
/// Redundant with the partition key today, kept so a user partition can hold
/// more than one item later on.
pub fn user_sort_key(id: &str) -> String {
    id.to_string()
}

/// Partition key of the email index for this address.
pub fn email_index_key(email: &str) -> String {
    format!("{EMAIL_PREFIX}{email}")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimaryKeyParts {
    pub pk: String,
    pub sk: String,
}

impl PrimaryKeyParts {
    pub fn for_user(id: &str) -> Self {
        Self {
            pk: user_partition_key(id),
            sk: user_sort_key(id),
        }
    }

    /// The key map expected by `GetItem` and `DeleteItem`.
    pub fn into_key(self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (PARTITION_KEY.to_string(), AttributeValue::S(self.pk)),
            (SORT_KEY.to_string(), AttributeValue::S(self.sk)),
        ])
    }

    /// Read the key attributes back out of a stored item or key map.
    pub fn from_item(item: &HashMap<String, AttributeValue>) -> Option<Self> {
        let pk = item.get(PARTITION_KEY)?.as_s().ok()?;
        let sk = item.get(SORT_KEY)?.as_s().ok()?;

        Some(Self {
            pk: pk.clone(),
            sk: sk.clone(),
        })
    }
}

/// Anything stored in the directory table knows its own keys.
pub trait Identifiable {
    fn primary_key(&self) -> PrimaryKeyParts;

    fn email_index_key(&self) -> String;
}

impl Identifiable for crate::User {
    fn primary_key(&self) -> PrimaryKeyParts {
        PrimaryKeyParts::for_user(&self.id)
    }

    fn email_index_key(&self) -> String {
        email_index_key(&self.email)
    }
}
