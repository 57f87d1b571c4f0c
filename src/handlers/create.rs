use std::sync::Arc;

use lambda_http::{Body, Request, Response};
use log::{error, info};

use super::{parse_body, render, required, HandlerError, RequestBody, ResponseBuilder};
use crate::{errors::Error, traits::DirectoryStore, User};

/// `POST /user/create` with `{"email": ...}`.
///
/// Email uniqueness is checked by reading the email index before writing.
/// The read and the write are separate calls, so two creates racing on the
/// same address can both pass the check. The index is also eventually
/// consistent, which widens that window to however long propagation takes.
#[derive(Debug)]
pub struct CreateHandler<S> {
    store: Arc<S>,
    responses: ResponseBuilder,
}

impl<S: DirectoryStore> CreateHandler<S> {
    pub fn new(store: Arc<S>, responses: ResponseBuilder) -> Self {
        Self { store, responses }
    }

    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let outcome = match parse_body(request) {
            Ok(body) => self.create_user(&body).await,
            Err(err) => Err(err),
        };

        render(&self.responses, "create", outcome)
    }

    async fn create_user(&self, body: &RequestBody) -> Result<String, HandlerError> {
        let email = required(body, "email")?;

        let existing = self.store.get_by_email(email).await.map_err(|err| {
            error!("error checking for existing user by email");
            Error::from(err)
        })?;

        if existing.is_some() {
            error!("user with email already exists");
            return Err(HandlerError::Conflict);
        }

        let user = self
            .store
            .put(User::register(email))
            .await
            .map_err(Error::from)?;
        info!("created user {}", user.id);

        serde_json::to_string(&user).map_err(HandlerError::Serialize)
    }
}
