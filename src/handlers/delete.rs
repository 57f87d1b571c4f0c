use std::sync::Arc;

use lambda_http::{Body, Request, Response};
use log::info;

use super::{parse_body, render, required, HandlerError, RequestBody, ResponseBuilder};
use crate::{errors::Error, traits::DirectoryStore, DeletedUser};

/// `POST /user/delete` with `{"id": ...}`. Responds with the deleted id
/// whether or not a record existed.
#[derive(Debug)]
pub struct DeleteHandler<S> {
    store: Arc<S>,
    responses: ResponseBuilder,
}

impl<S: DirectoryStore> DeleteHandler<S> {
    pub fn new(store: Arc<S>, responses: ResponseBuilder) -> Self {
        Self { store, responses }
    }

    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let outcome = match parse_body(request) {
            Ok(body) => self.delete_user(&body).await,
            Err(err) => Err(err),
        };

        render(&self.responses, "delete", outcome)
    }

    async fn delete_user(&self, body: &RequestBody) -> Result<String, HandlerError> {
        let id = required(body, "id")?;

        info!("attempting user deletion {id}");
        let id = self.store.delete(id).await.map_err(Error::from)?;
        info!("successfully deleted user {id} from db");

        serde_json::to_string(&DeletedUser { id }).map_err(HandlerError::Serialize)
    }
}
