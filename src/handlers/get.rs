use std::sync::Arc;

use lambda_http::{Body, Request, Response};

use super::{parse_body, render, required, HandlerError, RequestBody, ResponseBuilder};
use crate::{errors::Error, traits::DirectoryStore};

/// `POST /user/get` with `{"id": ...}`, or `{"email": ...}` to go through the
/// email index instead. An id takes precedence when both are given.
///
/// A missing user is still a 200, with `null` as the body.
#[derive(Debug)]
pub struct GetHandler<S> {
    store: Arc<S>,
    responses: ResponseBuilder,
}

impl<S: DirectoryStore> GetHandler<S> {
    pub fn new(store: Arc<S>, responses: ResponseBuilder) -> Self {
        Self { store, responses }
    }

    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let outcome = match parse_body(request) {
            Ok(body) => self.get_user(&body).await,
            Err(err) => Err(err),
        };

        render(&self.responses, "get", outcome)
    }

    async fn get_user(&self, body: &RequestBody) -> Result<String, HandlerError> {
        let user = if let Ok(id) = required(body, "id") {
            self.store.get_by_id(id).await.map_err(Error::from)?
        } else if let Ok(email) = required(body, "email") {
            self.store.get_by_email(email).await.map_err(Error::from)?
        } else {
            return Err(HandlerError::MissingField("id"));
        };

        serde_json::to_string(&user).map_err(HandlerError::Serialize)
    }
}
