use std::time::Duration;

use aws_credential_types::{provider::SharedCredentialsProvider, Credentials};
use user_directory::{
    client::{ClientConfig, UserApiClient},
    ClientError, DeletedUser, User, UserApiError,
};
use wiremock::{
    matchers::{body_string, header, header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn credentials() -> SharedCredentialsProvider {
    SharedCredentialsProvider::new(Credentials::new(
        "AKIDEXAMPLE",
        "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        None,
        None,
        "client_tests",
    ))
}

async fn client_for(server: &MockServer) -> UserApiClient {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ClientConfig::new(&format!("{}/user", server.uri())).expect("valid base url");
    UserApiClient::new(config, credentials()).expect("Failed to build client")
}

#[tokio::test]
async fn test_create_user_sends_signed_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/create"))
        .and(header("content-type", "application/json"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(body_string(r#"{"email":"a@example.com"}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id": "1234", "email": "a@example.com"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .await
        .create_user("a@example.com")
        .await
        .expect("create should succeed");

    assert_eq!(user, User::new("1234", "a@example.com"));
}

#[tokio::test]
async fn test_signature_scope_uses_configured_region() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/create"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id": "1", "email": "a@example.com"}"#),
        )
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .create_user("a@example.com")
        .await
        .unwrap();

    let requests = server.received_requests().await.expect("recording enabled");
    let authorization = requests[0].headers["authorization"].to_str().unwrap();

    assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(authorization.contains("/eu-west-2/execute-api/aws4_request"));
    assert!(authorization.contains("Signature="));
}

#[tokio::test]
async fn test_delete_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/delete"))
        .and(header_exists("authorization"))
        .and(body_string(r#"{"id":"1234"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": "1234"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server).await.delete_user("1234").await.unwrap();

    assert_eq!(deleted, DeletedUser { id: "1234".into() });
}

#[tokio::test]
async fn test_service_errors_keep_the_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/create"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/delete"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message": "Something went wrong!"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let err = client.create_user("a@example.com").await.unwrap_err();
    assert_eq!(
        err.as_client_error(),
        Some(&ClientError {
            status_code: 400,
            message: "bad request".into(),
        })
    );

    let err = client.delete_user("1234").await.unwrap_err();
    let client_error = err.as_client_error().expect("500 is a service error");
    assert_eq!(client_error.status_code, 500);
    assert_eq!(client_error.message, r#"{"message": "Something went wrong!"}"#);
}

#[tokio::test]
async fn test_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_user("a@example.com")
        .await
        .unwrap_err();

    assert!(err.as_client_error().is_none());
    assert!(matches!(
        err,
        UserApiError::UnexpectedStatus { status_code: 503, ref body } if body == "unavailable"
    ));
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_user("a@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, UserApiError::Decode(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id": "1", "email": "a@example.com"}"#)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(&format!("{}/user", server.uri()))
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let client = UserApiClient::new(config, credentials()).unwrap();

    let err = client.create_user("a@example.com").await.unwrap_err();

    match err {
        UserApiError::Transport(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected a transport timeout, got {other:?}"),
    }
}
