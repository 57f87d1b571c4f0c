use std::env;

use aws_config::{BehaviorVersion, SdkConfig};

use crate::directory_table::attribute_name::DEFAULT_EMAIL_INDEX;

pub const TABLE_NAME_VAR: &str = "USER_TABLE_NAME";
pub const EMAIL_INDEX_VAR: &str = "USER_EMAIL_INDEX";
pub const ENDPOINT_VAR: &str = "DYNAMODB_ENDPOINT";

pub const DEFAULT_TABLE_NAME: &str = "userTable";

/// Where the directory table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub table_name: String,
    pub email_index: String,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local.
    pub endpoint_url: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            email_index: DEFAULT_EMAIL_INDEX.to_string(),
            endpoint_url: None,
        }
    }
}

impl DirectoryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unset or empty variables fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let defaults = Self::default();

        Self {
            table_name: var(TABLE_NAME_VAR).unwrap_or(defaults.table_name),
            email_index: var(EMAIL_INDEX_VAR).unwrap_or(defaults.email_index),
            endpoint_url: var(ENDPOINT_VAR),
        }
    }

    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        loader.load().await
    }
}
