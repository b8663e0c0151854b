#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use twitter_api::{auth::clock::ManualClock, config::Config, db, rest, AppState};

pub const ACCESS_TTL_SECS: i64 = 60;
pub const REFRESH_TTL_SECS: i64 = 3_600;

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    // one connection: every `:memory:` connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    db::migrate(&pool).await.expect("run migrations");

    let config = Config {
        database_url: "sqlite::memory:".into(),
        bind_addr: "127.0.0.1:0".into(),
        secret_key: "test-secret".into(),
        access_token_ttl: chrono::Duration::seconds(ACCESS_TTL_SECS),
        refresh_token_ttl: chrono::Duration::seconds(REFRESH_TTL_SECS),
    };
    let clock = Arc::new(ManualClock::new(chrono::Utc::now().timestamp()));
    let state = AppState::new(pool, &config, clock.clone());

    TestApp {
        router: rest::router(state.clone()),
        clock,
        state,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.expect("request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON")
        };
        (status, json)
    }

    pub async fn signup(&self, email: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/auth/signup",
                None,
                Some(signup_body(email)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

pub fn signup_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "H4rdP455w0rd",
        "first_name": "Bento",
        "last_name": "Benack",
    })
}

pub fn access_token(body: &Value) -> String {
    body["access_token"].as_str().expect("access_token").to_owned()
}
