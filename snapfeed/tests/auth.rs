use self::common::{
    backend, context, data, error_code, error_message, execute, session_json, state,
    state_with_client, user_json, USER_ID, VALID_TOKEN,
};
use async_graphql::Value;
use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use serde_json::json;
use snapfeed::{context::Credential, state::Zustand};
use snapfeed_http_client::{Body, Client};
use snapfeed_test::json_response;
use std::{convert::Infallible, time::Duration};
use tower::service_fn;

mod common;

#[tokio::test]
async fn anonymous_request() {
    let backend = backend().build();
    let state = state(&backend);

    let context = context(&state, None).await;
    assert!(context.user().is_none());
    assert!(context.token().is_none());

    let response = execute(&state, None, "{ viewer { id } }").await;
    assert_eq!(data(response), json!({ "viewer": null }));

    // no token, nothing to verify
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn invalid_token_degrades_to_anonymous() {
    let backend = backend().build();
    let state = state(&backend);

    let credential = state.service.auth.resolve(Some("garbage")).await;
    assert!(matches!(credential, Credential::Invalid));

    let context = context(&state, Some("garbage")).await;
    assert!(context.user().is_none());
    assert!(context.token().is_none());

    let response = execute(&state, Some("garbage"), "{ viewer { id } }").await;
    assert_eq!(data(response), json!({ "viewer": null }));
}

#[tokio::test]
async fn unreachable_backend_degrades_to_anonymous() {
    let backend = snapfeed_test::MockBackend::builder()
        .route(
            Method::GET,
            "/auth/v1/user",
            StatusCode::SERVICE_UNAVAILABLE,
            "upstream connect error",
        )
        .build();
    let state = state(&backend);

    let credential = state.service.auth.resolve(Some(VALID_TOKEN)).await;
    assert!(matches!(credential, Credential::Invalid));
}

#[tokio::test]
async fn valid_token_resolves_viewer() {
    let backend = backend().build();
    let state = state(&backend);

    let context = context(&state, Some(VALID_TOKEN)).await;
    assert_eq!(context.token(), Some(VALID_TOKEN));
    assert_eq!(context.user().unwrap().id.to_string(), USER_ID);

    let response = execute(&state, Some(VALID_TOKEN), "{ viewer { id email } }").await;
    assert_eq!(
        data(response),
        json!({ "viewer": { "id": USER_ID, "email": "ana@example.com" } })
    );
}

#[tokio::test]
async fn sign_up() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/signup",
            StatusCode::OK,
            user_json().to_string(),
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signUp(email: "ana@example.com", password: "hunter22") { id email } }"#,
    )
    .await;

    assert_eq!(
        data(response),
        json!({ "signUp": { "id": USER_ID, "email": "ana@example.com" } })
    );
}

#[tokio::test]
async fn sign_up_with_auto_confirmation() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/signup",
            StatusCode::OK,
            session_json().to_string(),
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signUp(email: "ana@example.com", password: "hunter22") { id } }"#,
    )
    .await;

    assert_eq!(data(response), json!({ "signUp": { "id": USER_ID } }));
}

#[tokio::test]
async fn sign_up_duplicate_email() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/signup",
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signUp(email: "ana@example.com", password: "hunter22") { id } }"#,
    )
    .await;

    assert_eq!(error_message(&response), "User already registered");
    assert_eq!(error_code(&response), Some(&Value::from("BAD_REQUEST")));
}

#[tokio::test]
async fn sign_up_rejects_invalid_email() {
    let backend = backend().build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signUp(email: "not an email", password: "hunter22") { id } }"#,
    )
    .await;

    assert!(!response.errors.is_empty());
    assert!(backend
        .requests_to(&Method::POST, "/auth/v1/signup")
        .is_empty());
}

#[tokio::test]
async fn sign_in_matches_token_resolution() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/token",
            StatusCode::OK,
            session_json().to_string(),
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signIn(email: "ana@example.com", password: "hunter22") { accessToken refreshToken user { id } } }"#,
    )
    .await;
    let data = data(response);
    assert_eq!(data["signIn"]["refreshToken"], "refresh-token");

    let access_token = data["signIn"]["accessToken"].as_str().unwrap();
    let context = context(&state, Some(access_token)).await;
    assert_eq!(
        context.user().unwrap().id.to_string(),
        data["signIn"]["user"]["id"].as_str().unwrap()
    );
}

#[tokio::test]
async fn sign_in_with_invalid_credentials() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/token",
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signIn(email: "ana@example.com", password: "wrong") { accessToken } }"#,
    )
    .await;

    assert_eq!(error_message(&response), "Invalid login credentials");
    assert_eq!(error_code(&response), Some(&Value::from("UNAUTHENTICATED")));
}

#[tokio::test]
async fn sign_in_with_backend_outage() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/token",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"connection to database lost"}"#,
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { signIn(email: "ana@example.com", password: "hunter22") { accessToken } }"#,
    )
    .await;

    assert_eq!(error_message(&response), "Internal server error");
    assert_eq!(
        error_code(&response),
        Some(&Value::from("INTERNAL_SERVER_ERROR"))
    );
}

/// Backend that never answers within the client's timeout
fn stalled_state() -> Zustand {
    let service = service_fn(|_req: Request<Body>| async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok::<_, Infallible>(Response::new(Full::<Bytes>::default()))
    });
    let client = Client::builder()
        .timeout(Duration::from_millis(50))
        .service(service);

    state_with_client(client)
}

#[tokio::test]
async fn sign_in_with_backend_timeout() {
    let state = stalled_state();

    let response = execute(
        &state,
        None,
        r#"mutation { signIn(email: "ana@example.com", password: "hunter22") { accessToken } }"#,
    )
    .await;

    assert_eq!(error_message(&response), "Internal server error");
    assert_eq!(
        error_code(&response),
        Some(&Value::from("INTERNAL_SERVER_ERROR"))
    );
}

#[tokio::test]
async fn sign_up_with_backend_timeout() {
    let state = stalled_state();

    let response = execute(
        &state,
        None,
        r#"mutation { signUp(email: "ana@example.com", password: "hunter22") { id } }"#,
    )
    .await;

    assert_eq!(error_message(&response), "Internal server error");
    assert_eq!(
        error_code(&response),
        Some(&Value::from("INTERNAL_SERVER_ERROR"))
    );
}

#[tokio::test]
async fn token_verification_timeout_is_anonymous() {
    let state = stalled_state();

    let context = context(&state, Some(VALID_TOKEN)).await;
    assert!(!context.is_authenticated());
}

#[tokio::test]
async fn refresh_session() {
    let backend = backend()
        .route(
            Method::POST,
            "/auth/v1/token",
            StatusCode::OK,
            session_json().to_string(),
        )
        .build();
    let state = state(&backend);

    let response = execute(
        &state,
        None,
        r#"mutation { refreshSession(refreshToken: "refresh-token") { accessToken } }"#,
    )
    .await;
    assert_eq!(
        data(response),
        json!({ "refreshSession": { "accessToken": VALID_TOKEN } })
    );

    let requests = backend.requests_to(&Method::POST, "/auth/v1/token");
    assert_eq!(requests[0].query.as_deref(), Some("grant_type=refresh_token"));
}

#[tokio::test]
async fn sign_out() {
    let backend = backend()
        .route(Method::POST, "/auth/v1/logout", StatusCode::NO_CONTENT, "")
        .build();
    let state = state(&backend);

    let response = execute(&state, Some(VALID_TOKEN), "mutation { signOut }").await;
    assert_eq!(data(response), json!({ "signOut": true }));

    let requests = backend.requests_to(&Method::POST, "/auth/v1/logout");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].header("authorization"),
        Some(format!("Bearer {VALID_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn sign_out_requires_authentication() {
    let backend = backend().build();
    let state = state(&backend);

    let response = execute(&state, None, "mutation { signOut }").await;

    assert_eq!(error_message(&response), "Authentication required");
    assert_eq!(error_code(&response), Some(&Value::from("UNAUTHENTICATED")));
    assert!(backend.requests().is_empty());
}
