#![allow(dead_code)]

use async_graphql::{Request, Response, Value};
use http::{Method, StatusCode};
use serde_json::json;
use snapfeed::{context::RequestContext, http::graphql, state::Zustand};
use snapfeed_config::supabase::Configuration as SupabaseConfiguration;
use snapfeed_http_client::Client as HttpClient;
use snapfeed_test::{json_response, MockBackend, MockBackendBuilder, RecordedRequest};

pub const USER_ID: &str = "8d3c7a6e-54a1-4c39-9a38-7b7f3d2c1e0a";
pub const VALID_TOKEN: &str = "valid-token";
pub const CREATED_AT: &str = "2024-05-01T10:00:00+00:00";

pub fn user_json() -> serde_json::Value {
    json!({
        "id": USER_ID,
        "aud": "authenticated",
        "email": "ana@example.com",
        "created_at": CREATED_AT,
    })
}

pub fn session_json() -> serde_json::Value {
    json!({
        "access_token": VALID_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-token",
        "user": user_json(),
    })
}

/// Backend that knows exactly one valid access token
pub fn backend() -> MockBackendBuilder {
    MockBackend::builder().route_fn(Method::GET, "/auth/v1/user", |req: &RecordedRequest| {
        if req.header("authorization") == Some(format!("Bearer {VALID_TOKEN}").as_str()) {
            json_response(StatusCode::OK, user_json().to_string())
        } else {
            json_response(
                StatusCode::UNAUTHORIZED,
                r#"{"code":401,"error_code":"bad_jwt","msg":"invalid JWT: unable to parse or verify signature"}"#,
            )
        }
    })
}

pub fn state(backend: &MockBackend) -> Zustand {
    state_with_client(backend.http_client())
}

pub fn state_with_client(http_client: HttpClient) -> Zustand {
    let config = SupabaseConfiguration {
        url: "https://project.supabase.co".into(),
        key: "anon-key".into(),
    };

    snapfeed::prepare_state(&config, http_client).unwrap()
}

pub async fn context(state: &Zustand, token: Option<&str>) -> RequestContext {
    let credential = state.service.auth.resolve(token).await;
    RequestContext::new(state.supabase.clone(), credential)
}

pub async fn execute(state: &Zustand, token: Option<&str>, query: &str) -> Response {
    let context = context(state, token).await;
    graphql::schema(state.clone())
        .execute(Request::new(query).data(context))
        .await
}

pub fn data(response: Response) -> serde_json::Value {
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

pub fn error_code(response: &Response) -> Option<&Value> {
    response.errors.first()?.extensions.as_ref()?.get("code")
}

pub fn error_message(response: &Response) -> &str {
    &response.errors[0].message
}
