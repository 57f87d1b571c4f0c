#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::{
    types::{
        AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
        Projection, ProjectionType, ScalarAttributeType,
    },
    Client,
};
use lambda_http::{Body, Request, Response};
use user_directory::{
    DeleteError, DirectoryStore, DirectoryTable, GetError, IndexMode, MemoryBackend, PutError,
    QueryError, User,
};

pub const LOCAL_ENDPOINT: &str = "http://localhost:8000";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn memory_table(mode: IndexMode) -> Arc<DirectoryTable<MemoryBackend>> {
    init_logging();
    Arc::new(DirectoryTable::new(MemoryBackend::new(mode)))
}

pub fn post(path: &str, body: &str) -> Request {
    lambda_http::http::Request::builder()
        .method("POST")
        .uri(path)
        .body(Body::from(body))
        .expect("Failed to build request")
}

pub fn body_json(response: &Response<Body>) -> serde_json::Value {
    serde_json::from_slice(response.body().as_ref()).expect("Response body is not JSON")
}

pub fn body_text(response: &Response<Body>) -> String {
    String::from_utf8_lossy(response.body().as_ref()).into_owned()
}

/// A store whose every call fails, for exercising the 500 paths.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl DirectoryStore for FailingStore {
    async fn get_by_id(&self, _id: &str) -> Result<Option<User>, GetError> {
        Err(GetError::Backend("connection reset".into()))
    }

    async fn get_by_email(&self, _email: &str) -> Result<Option<User>, QueryError> {
        Err(QueryError::Backend("connection reset".into()))
    }

    async fn put(&self, _user: User) -> Result<User, PutError> {
        Err(PutError::Backend("connection reset".into()))
    }

    async fn delete(&self, _id: &str) -> Result<String, DeleteError> {
        Err(DeleteError::Backend("connection reset".into()))
    }
}

pub async fn local_client() -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCAL_ENDPOINT)
        .load()
        .await;

    Client::new(&config)
}

pub async fn create_table(client: &Client, table_name: &str) {
    let _ = client.delete_table().table_name(table_name).send().await;

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("_pk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("Failed to build attribute definition"),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("_sk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("Failed to build attribute definition"),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("_gsi1")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("Failed to build attribute definition"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("_pk")
                .key_type(KeyType::Hash)
                .build()
                .expect("Failed to build key schema element"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("_sk")
                .key_type(KeyType::Range)
                .build()
                .expect("Failed to build key schema element"),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name("gsi1")
                .key_schema(
                    KeySchemaElement::builder()
                        .attribute_name("_gsi1")
                        .key_type(KeyType::Hash)
                        .build()
                        .expect("Failed to build key schema element"),
                )
                .projection(
                    Projection::builder()
                        .projection_type(ProjectionType::All)
                        .build(),
                )
                .build()
                .expect("Failed to build index"),
        )
        .send()
        .await
        .expect("Failed to create table");
}

#[macro_export]
macro_rules! assert_err {
    ($cond:expr,) => {
        $crate::assert_err!($cond);
    };
    ($cond:expr) => {
        match $cond {
            Ok(t) => {
                panic!("assertion failed, expected Err(..), got Ok({:?})", t);
            },
            Err(e) => e,
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        match $cond {
            Ok(t) => {
                panic!("assertion failed, expected Err(..), got Ok({:?}): {}", t, format_args!($($arg)+));
            },
            Err(e) => e,
        }
    };
}
