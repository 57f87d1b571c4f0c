use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadConversionError {
    #[error("Missing attribute: {0}")]
    NoSuchAttribute(String),
    #[error("Failed to convert item: {0}")]
    ConversionFailed(#[from] serde_dynamo::Error),
}

#[derive(Debug, Error)]
pub enum WriteConversionError {
    #[error("Failed to convert record to item: {0}")]
    ConversionFailed(#[from] serde_dynamo::Error),
}

/// Error returned by [`DirectoryStore::put`](crate::DirectoryStore::put) when writing a record
#[derive(Error, Debug)]
pub enum PutError {
    #[error("BackendError: {0}")]
    Backend(String),
    #[error("Write Conversion Error: {0}")]
    WriteConversion(#[from] WriteConversionError),
}

/// Error returned by [`DirectoryStore::get_by_id`](crate::DirectoryStore::get_by_id)
#[derive(Error, Debug)]
pub enum GetError {
    #[error("BackendError: {0}")]
    Backend(String),
    #[error("Read Conversion Error: {0}")]
    ReadConversion(#[from] ReadConversionError),
}

/// Error returned by [`DirectoryStore::get_by_email`](crate::DirectoryStore::get_by_email)
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("BackendError: {0}")]
    Backend(String),
    #[error("Read Conversion Error: {0}")]
    ReadConversion(#[from] ReadConversionError),
    /// The email index returned more than one record for an address that is
    /// supposed to be unique.
    #[error("IntegrityViolation: expected at most 1 record for {email}, found {matches}")]
    IntegrityViolation { email: String, matches: usize },
}

/// Error returned by [`DirectoryStore::delete`](crate::DirectoryStore::delete)
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("BackendError: {0}")]
    Backend(String),
}

/// Error abstracting all errors returned by the directory store.
///
/// If you use this error you can use `?` to convert from the per-operation
/// errors to this one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("PutError: {0}")]
    PutError(#[from] PutError),
    #[error("GetError: {0}")]
    GetError(#[from] GetError),
    #[error("QueryError: {0}")]
    QueryError(#[from] QueryError),
    #[error("DeleteError: {0}")]
    DeleteError(#[from] DeleteError),
}

/// The service answered with a status it uses for errors it understands
/// (400 or 500). `message` is the raw response body, not re-parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    pub status_code: u16,
    pub message: String,
}

/// Error returned by [`UserApiClient`](crate::client::UserApiClient) calls
#[derive(Error, Debug)]
pub enum UserApiError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("api responded with unexpected status code {status_code}, with body {body}")]
    UnexpectedStatus { status_code: u16, body: String },
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("TransportError: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("CredentialsError: {0}")]
    Credentials(String),
    #[error("SigningError: {0}")]
    Signing(String),
    #[error("Invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl UserApiError {
    /// The structured rejection, if that is what this error is.
    pub fn as_client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(err) => Some(err),
            _ => None,
        }
    }
}
