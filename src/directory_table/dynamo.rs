use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use log::debug;

use super::{table_entry::Item, TableBackend};
use crate::errors::{DeleteError, GetError, PutError, QueryError};

/// [`TableBackend`] over a real DynamoDB table.
#[derive(Clone)]
pub struct DynamoBackend {
    db: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoBackend")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoBackend {
    pub fn new(db: Client, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl TableBackend for DynamoBackend {
    async fn get_item(&self, key: Item) -> Result<Option<Item>, GetError> {
        let result = self
            .db
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| GetError::Backend(format!("{e:?}")))?;

        Ok(result.item.filter(|item| !item.is_empty()))
    }

    async fn query_index(
        &self,
        index_name: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<Item>, QueryError> {
        debug!("querying {index_name} on {}", self.table_name);

        let result = self
            .db
            .query()
            .table_name(&self.table_name)
            .index_name(index_name)
            .key_condition_expression("#key = :key")
            .expression_attribute_names("#key", attribute)
            .expression_attribute_values(":key", AttributeValue::S(value.to_string()))
            .send()
            .await
            .map_err(|e| QueryError::Backend(format!("{e:?}")))?;

        Ok(result.items.unwrap_or_default())
    }

    async fn put_item(&self, item: Item) -> Result<(), PutError> {
        self.db
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| PutError::Backend(format!("{e:?}")))?;

        Ok(())
    }

    async fn delete_item(&self, key: Item) -> Result<(), DeleteError> {
        self.db
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| DeleteError::Backend(format!("{e:?}")))?;

        Ok(())
    }
}
