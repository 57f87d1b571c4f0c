use std::time::SystemTime;

use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::{
    http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings},
    sign::v4,
};
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::{
    header::{HeaderName, HeaderValue},
    Request,
};
use sha2::{Digest, Sha256};

use crate::errors::UserApiError;

/// Hex-encoded SHA-256 of the payload, as SigV4 expects it.
pub fn content_hash(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Signs outbound requests with SigV4 using credentials from a provider.
///
/// Credentials are fetched per request so short-lived credentials are
/// refreshed by the provider rather than cached here.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: SharedCredentialsProvider,
    region: String,
    service: String,
}

impl RequestSigner {
    pub fn new(
        credentials: SharedCredentialsProvider,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    /// Add the signature headers to `request`.
    ///
    /// `body` must be exactly the bytes the request will carry. Anything that
    /// changes the request after this call invalidates the signature.
    pub async fn sign(&self, request: &mut Request, body: &[u8]) -> Result<(), UserApiError> {
        self.sign_at(request, body, SystemTime::now()).await
    }

    pub(crate) async fn sign_at(
        &self,
        request: &mut Request,
        body: &[u8],
        time: SystemTime,
    ) -> Result<(), UserApiError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| UserApiError::Credentials(e.to_string()))?;
        let identity: Identity = credentials.into();

        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(&self.service)
            .time(time)
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| UserApiError::Signing(e.to_string()))?
            .into();

        let headers: Vec<(&str, &str)> = request
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
            .collect();

        let signable = SignableRequest::new(
            request.method().as_str(),
            request.url().as_str(),
            headers.into_iter(),
            SignableBody::Precomputed(content_hash(body)),
        )
        .map_err(|e| UserApiError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| UserApiError::Signing(e.to_string()))?
            .into_parts();

        for (name, value) in instructions.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| UserApiError::Signing(e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| UserApiError::Signing(e.to_string()))?;
            request.headers_mut().insert(name, value);
        }

        Ok(())
    }
}
