//! Lambda handlers for the directory's HTTP surface.
//!
//! Each handler parses a flat JSON object of strings, runs one operation
//! against a [`DirectoryStore`] and renders exactly one response. Failure
//! detail is logged; callers only ever see the fixed bodies in [`response`].

mod create;
mod delete;
mod get;
pub mod response;

pub use self::{
    create::CreateHandler, delete::DeleteHandler, get::GetHandler, response::ResponseBuilder,
};

use std::{collections::HashMap, sync::Arc};

use lambda_http::{http::StatusCode, Body, Request, RequestExt, Response};
use log::{error, warn};
use thiserror::Error;

use crate::{errors, traits::DirectoryStore};

pub const CREATE_PATH: &str = "/user/create";
pub const GET_PATH: &str = "/user/get";
pub const DELETE_PATH: &str = "/user/delete";

#[derive(Debug, Error)]
pub(crate) enum HandlerError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("Missing or empty field: {0}")]
    MissingField(&'static str),
    #[error("user with email already exists")]
    Conflict,
    #[error("StoreError: {0}")]
    Store(#[from] errors::Error),
    #[error("Failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl HandlerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::Conflict | Self::Store(_) | Self::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Turn the outcome of an operation into the single response it produces.
pub(crate) fn render(
    responses: &ResponseBuilder,
    operation: &str,
    outcome: Result<String, HandlerError>,
) -> Response<Body> {
    let err = match outcome {
        Ok(body) => return responses.ok(body),
        Err(err) => err,
    };

    match err.status() {
        StatusCode::BAD_REQUEST => {
            warn!("{operation}: rejected request: {err}");
            responses.invalid_request()
        }
        _ => {
            error!("{operation}: failed: {err}");
            responses.internal_error()
        }
    }
}

pub(crate) type RequestBody = HashMap<String, String>;

pub(crate) fn parse_body(request: &Request) -> Result<RequestBody, HandlerError> {
    serde_json::from_slice(request.body().as_ref()).map_err(HandlerError::MalformedBody)
}

pub(crate) fn required<'b>(
    body: &'b RequestBody,
    field: &'static str,
) -> Result<&'b str, HandlerError> {
    body.get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(HandlerError::MissingField(field))
}

/// Dispatches requests to the operation handlers by path.
///
/// Paths other than [`CREATE_PATH`], [`GET_PATH`] and [`DELETE_PATH`] get the
/// fixed "invalid path" response.
#[derive(Debug)]
pub struct Router<S> {
    create: CreateHandler<S>,
    get: GetHandler<S>,
    delete: DeleteHandler<S>,
    responses: ResponseBuilder,
}

impl<S: DirectoryStore> Router<S> {
    pub fn new(store: S, responses: ResponseBuilder) -> Self {
        Self::shared(Arc::new(store), responses)
    }

    /// Route over a store that is also used elsewhere.
    pub fn shared(store: Arc<S>, responses: ResponseBuilder) -> Self {
        Self {
            create: CreateHandler::new(Arc::clone(&store), responses.clone()),
            get: GetHandler::new(Arc::clone(&store), responses.clone()),
            delete: DeleteHandler::new(store, responses.clone()),
            responses,
        }
    }

    pub async fn route(&self, request: &Request) -> Response<Body> {
        // API Gateway hands us the resource path without the stage prefix
        let path = match request.raw_http_path() {
            "" => request.uri().path(),
            raw => raw,
        };

        match path {
            CREATE_PATH => self.create.handle(request).await,
            GET_PATH => self.get.handle(request).await,
            DELETE_PATH => self.delete.handle(request).await,
            _ => {
                error!("invalid path {path}");
                self.responses.invalid_path()
            }
        }
    }
}
