//! Client for the directory's public endpoints.
//!
//! Requests are SigV4-signed so the API gateway in front of the handlers can
//! authenticate the caller with IAM. Responses map onto three outcomes: the
//! decoded body, a [`ClientError`] for the statuses the service uses to
//! report errors, and [`UserApiError::UnexpectedStatus`] for anything else.

mod signer;

pub use signer::{content_hash, RequestSigner};

use std::{collections::BTreeMap, time::Duration};

use aws_config::BehaviorVersion;
use aws_credential_types::provider::SharedCredentialsProvider;
use log::{error, info};
use reqwest::{header::CONTENT_TYPE, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    errors::{ClientError, UserApiError},
    DeletedUser, User,
};

pub const DEFAULT_REGION: &str = "eu-west-2";
pub const DEFAULT_SERVICE: &str = "execute-api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    region: String,
    service: String,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, UserApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| UserApiError::InvalidBaseUrl(e.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(UserApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

pub struct UserApiClient {
    base_url: Url,
    http: reqwest::Client,
    signer: RequestSigner,
}

impl std::fmt::Debug for UserApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl UserApiClient {
    pub fn new(
        config: ClientConfig,
        credentials: SharedCredentialsProvider,
    ) -> Result<Self, UserApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url,
            http,
            signer: RequestSigner::new(credentials, config.region, config.service),
        })
    }

    /// Build a client that signs with the default AWS credential chain.
    pub async fn from_env(config: ClientConfig) -> Result<Self, UserApiError> {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let credentials = sdk_config.credentials_provider().ok_or_else(|| {
            UserApiError::Credentials("no credentials provider configured".into())
        })?;

        Self::new(config, credentials)
    }

    pub async fn create_user(&self, email: &str) -> Result<User, UserApiError> {
        self.post("create", BTreeMap::from([("email", email)])).await
    }

    // TODO: switch to the DELETE method once the gateway route accepts it
    pub async fn delete_user(&self, id: &str) -> Result<DeletedUser, UserApiError> {
        self.post("delete", BTreeMap::from([("id", id)])).await
    }

    fn endpoint(&self, operation: &str) -> Result<Url, UserApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UserApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(operation);
        Ok(url)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: BTreeMap<&str, &str>,
    ) -> Result<T, UserApiError> {
        let url = self.endpoint(operation)?;
        let payload = serde_json::to_vec(&body).map_err(UserApiError::Serialize)?;

        info!("building request");
        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.clone())
            .build()?;

        self.signer.sign(&mut request, &payload).await?;

        info!("sending request");
        let response = self.http.execute(request).await.map_err(|e| {
            error!("request error");
            UserApiError::Transport(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        decode_response(status, &bytes)
    }
}

/// Map a response onto the client's three outcomes.
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, UserApiError> {
    match status {
        StatusCode::OK => {
            info!("request success");
            serde_json::from_slice(body).map_err(UserApiError::Decode)
        }
        StatusCode::BAD_REQUEST | StatusCode::INTERNAL_SERVER_ERROR => {
            error!("error status code received: {}", status.as_u16());
            Err(ClientError {
                status_code: status.as_u16(),
                message: String::from_utf8_lossy(body).into_owned(),
            }
            .into())
        }
        _ => Err(UserApiError::UnexpectedStatus {
            status_code: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}
