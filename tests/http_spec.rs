use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use prompt_share::Registry;
use prompt_share::config::{Config, GoogleProvider, SiteMeta, StorageKind};
use prompt_share::db::repo::MemoryUserRepository;
use prompt_share::net::http::router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let config = Config {
        http_addr: "127.0.0.1:0".into(),
        public_url: "https://prompts.example.com/".into(),
        database_url: String::new(),
        db_pool_size: 1,
        storage: StorageKind::Memory,
        google: GoogleProvider {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
        },
        site: SiteMeta::default(),
    };
    let registry = Registry::new(Arc::new(config), Arc::new(MemoryUserRepository::new()));
    router(Arc::new(registry))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn callback(profile: Value) -> Request<Body> {
    Request::post("/api/auth/callback/google")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(profile.to_string()))
        .unwrap()
}

#[tokio::test]
async fn index_renders_layout() {
    let app = app();
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>prompt-share</title>"));
    assert!(body.contains(r#"<main class="app">"#));
    assert!(body.contains("Sign in"));
}

#[tokio::test]
async fn providers_never_expose_secret() {
    let app = app();
    let (status, body) = send(&app, Request::get("/api/auth/providers").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("client-secret"));
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["google"]["type"], "oauth");
    assert_eq!(
        v["google"]["callbackUrl"],
        "https://prompts.example.com/api/auth/callback/google"
    );
}

#[tokio::test]
async fn callback_provisions_then_session_resolves() {
    let app = app();

    let (status, body) = send(
        &app,
        callback(json!({ "email": "john@example.com", "name": "John Doe", "picture": "https://example.com/j.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let signed_in: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(signed_in["ok"], true);
    assert_eq!(signed_in["created"], true);
    assert_eq!(signed_in["user"]["username"], "johndoe0");

    let (status, body) = send(
        &app,
        Request::get("/api/auth/session?email=john@example.com").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(session["id"], signed_in["user"]["id"]);

    // second sign-in reuses the record
    let (status, body) = send(&app, callback(json!({ "email": "john@example.com", "name": "John Doe" }))).await;
    assert_eq!(status, StatusCode::OK);
    let again: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(again["created"], false);
}

#[tokio::test]
async fn callback_denies_taken_username() {
    let app = app();
    send(&app, callback(json!({ "email": "john@example.com", "name": "John Doe" }))).await;

    let (status, body) = send(&app, callback(json!({ "email": "jd@example.com", "name": "john_doe" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["ok"], false);
    assert_eq!(v["error"], "AccessDenied");
}

#[tokio::test]
async fn session_for_unknown_email_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        Request::get("/api/auth/session?email=nobody@example.com").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
