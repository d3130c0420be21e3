#![allow(dead_code)]

use std::time::Duration;

use attendance_server::{api::app_router, auth::AuthConfig, build_state, config::Config};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    // Keeps the database directory alive for the duration of the test.
    _dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        log_format: "text".to_string(),
        auth: AuthConfig {
            jwt_secret: vec![42u8; 32],
            access_token_ttl: Duration::from_secs(3600),
        },
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config).unwrap(),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };
        (status, json)
    }

    /// Registers a user and returns its token.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_subject(&self, token: &str, body: Value) -> Value {
        let (status, created) = self
            .request(Method::POST, "/api/subjects", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {created}");
        created
    }
}

pub fn subject_body(name: &str, total: i32, attended: i32, missed: i32, target: f64) -> Value {
    serde_json::json!({
        "name": name,
        "startDate": "2024-01-08",
        "endDate": "2024-05-31",
        "totalClasses": total,
        "attendedClasses": attended,
        "missedClasses": missed,
        "targetPercentage": target,
    })
}
