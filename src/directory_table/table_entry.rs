use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use super::attribute_name::{is_internal, EMAIL_INDEX_KEY, PARTITION_KEY, SORT_KEY};
use crate::{
    errors::{ReadConversionError, WriteConversionError},
    traits::{Identifiable, PrimaryKeyParts},
    User,
};

/// A raw DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

/// A user record about to be written: its keys plus the record's own
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub(crate) key: PrimaryKeyParts,
    pub(crate) email_key: String,
    pub(crate) attributes: Item,
}

impl TableEntry {
    pub fn from_user(user: &User) -> Result<Self, WriteConversionError> {
        let attributes: Item = serde_dynamo::to_item(user)?;

        Ok(Self {
            key: user.primary_key(),
            email_key: user.email_index_key(),
            attributes,
        })
    }

    pub fn into_item(self) -> Item {
        let mut item = self.attributes;
        item.insert(PARTITION_KEY.to_string(), AttributeValue::S(self.key.pk));
        item.insert(SORT_KEY.to_string(), AttributeValue::S(self.key.sk));
        item.insert(EMAIL_INDEX_KEY.to_string(), AttributeValue::S(self.email_key));
        item
    }

    /// Decode a stored item back into a [`User`].
    ///
    /// Both primary key attributes must be present. They, and the email index
    /// key, are dropped before the remaining attributes are decoded.
    pub fn read_user(item: Item) -> Result<User, ReadConversionError> {
        Ok(serde_dynamo::from_item(record_attributes(item)?)?)
    }
}

fn record_attributes(item: Item) -> Result<Item, ReadConversionError> {
    if PrimaryKeyParts::from_item(&item).is_none() {
        let missing = if item.contains_key(PARTITION_KEY) {
            SORT_KEY
        } else {
            PARTITION_KEY
        };
        return Err(ReadConversionError::NoSuchAttribute(missing.to_string()));
    }

    Ok(item.into_iter().filter(|(k, _)| !is_internal(k)).collect())
}
