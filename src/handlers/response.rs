use lambda_http::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
        HeaderMap, HeaderValue, StatusCode,
    },
    Body, Response,
};

pub const GENERIC_ERROR: &str = r#"{"message": "Something went wrong!"}"#;
pub const INVALID_REQUEST: &str = r#"{"message": "Invalid request"}"#;
pub const INVALID_PATH: &str = r#"{"message": "Invalid path"}"#;

/// Renders handler outcomes as wire responses.
///
/// Holds the CORS headers every response carries. Built once and cloned into
/// each handler; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    headers: HeaderMap,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new(
            HeaderValue::from_static("Content-Type"),
            HeaderValue::from_static("*"),
            HeaderValue::from_static("OPTIONS,POST,GET"),
        )
    }
}

impl ResponseBuilder {
    pub fn new(
        allow_headers: HeaderValue,
        allow_origin: HeaderValue,
        allow_methods: HeaderValue,
    ) -> Self {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, allow_methods);
        Self { headers }
    }

    pub fn respond(&self, status: StatusCode, body: impl Into<String>) -> Response<Body> {
        let mut response = Response::new(Body::Text(body.into()));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.extend(self.headers.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        response
    }

    pub fn ok(&self, body: impl Into<String>) -> Response<Body> {
        self.respond(StatusCode::OK, body)
    }

    pub fn invalid_request(&self) -> Response<Body> {
        self.respond(StatusCode::BAD_REQUEST, INVALID_REQUEST)
    }

    pub fn invalid_path(&self) -> Response<Body> {
        self.respond(StatusCode::BAD_REQUEST, INVALID_PATH)
    }

    pub fn internal_error(&self) -> Response<Body> {
        self.respond(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR)
    }
}
