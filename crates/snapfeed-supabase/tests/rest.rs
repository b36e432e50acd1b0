use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use snapfeed_supabase::{Client, Order};
use snapfeed_test::MockBackend;
use std::collections::HashMap;

#[derive(Debug, Deserialize, PartialEq)]
struct PostRow {
    id: i64,
    content: String,
}

#[derive(Serialize)]
struct NewPost<'a> {
    content: &'a str,
}

fn client(backend: &MockBackend) -> Client {
    Client::new(backend.http_client(), "https://project.supabase.co", "anon-key").unwrap()
}

fn query_params(query: Option<&str>) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .into_owned()
        .collect()
}

#[tokio::test]
async fn select_with_filters() {
    let backend = MockBackend::builder()
        .route(
            Method::GET,
            "/rest/v1/posts",
            StatusCode::OK,
            r#"[{"id":2,"content":"second"},{"id":1,"content":"first"}]"#,
        )
        .build();

    let rows: Vec<PostRow> = client(&backend)
        .from("posts")
        .select("id, content")
        .eq("user_id", "abc")
        .order("created_at", Order::Descending)
        .limit(10)
        .execute()
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].content, "second");

    let requests = backend.requests_to(&Method::GET, "/rest/v1/posts");
    let params = query_params(requests[0].query.as_deref());
    assert_eq!(params["select"], "id, content");
    assert_eq!(params["user_id"], "eq.abc");
    assert_eq!(params["order"], "created_at.desc");
    assert_eq!(params["limit"], "10");
}

#[tokio::test]
async fn insert_returns_representation() {
    let backend = MockBackend::builder()
        .route(
            Method::POST,
            "/rest/v1/posts",
            StatusCode::CREATED,
            r#"[{"id":7,"content":"hello"}]"#,
        )
        .build();

    let rows: Vec<PostRow> = client(&backend)
        .from("posts")
        .insert(&NewPost { content: "hello" })
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert_eq!(
        rows,
        [PostRow {
            id: 7,
            content: "hello".into()
        }]
    );

    let requests = backend.requests_to(&Method::POST, "/rest/v1/posts");
    assert_eq!(requests[0].header("prefer"), Some("return=representation"));
    assert_eq!(requests[0].header("apikey"), Some("anon-key"));
    assert_eq!(requests[0].body_str(), r#"{"content":"hello"}"#);
}

#[tokio::test]
async fn insert_rejected_by_row_level_security() {
    let backend = MockBackend::builder()
        .route(
            Method::POST,
            "/rest/v1/posts",
            StatusCode::FORBIDDEN,
            r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"posts\""}"#,
        )
        .build();

    let err = client(&backend)
        .from("posts")
        .insert(&NewPost { content: "hello" })
        .unwrap()
        .execute::<PostRow>()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(err.to_string().contains("row-level security"));
}

#[tokio::test]
async fn rpc_call() {
    let backend = MockBackend::builder()
        .route(
            Method::POST,
            "/rest/v1/rpc/get_posts_with_details",
            StatusCode::OK,
            r#"[{"id":1,"content":"first"}]"#,
        )
        .build();

    let rows: Vec<PostRow> = client(&backend)
        .rpc("get_posts_with_details", &serde_json::json!({}))
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);

    let requests = backend.requests_to(&Method::POST, "/rest/v1/rpc/get_posts_with_details");
    assert_eq!(requests[0].body_str(), "{}");
}

#[tokio::test]
async fn bearer_depends_on_scope() {
    let backend = MockBackend::builder()
        .route(Method::GET, "/rest/v1/profiles", StatusCode::OK, "[]")
        .build();
    let client = client(&backend);

    let _: Vec<PostRow> = client
        .from("profiles")
        .select("*")
        .execute()
        .await
        .unwrap();
    let _: Vec<PostRow> = client
        .with_access_token("user-token")
        .from("profiles")
        .select("*")
        .execute()
        .await
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("authorization"), Some("Bearer anon-key"));
    assert_eq!(requests[1].header("authorization"), Some("Bearer user-token"));
    assert!(requests
        .iter()
        .all(|request| request.header("apikey") == Some("anon-key")));
}
