//! Shared harness for the HTTP tests: a fresh in-memory server per test,
//! driven through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use hr_server::api::build_app;
use hr_server::services::RecordingMailer;
use hr_server::{Config, ErrorCode, ServerState};

pub const ADMIN_EMAIL: &str = "admin@hrms.local";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = Config::for_tests();
        let mailer = Arc::new(RecordingMailer::new());
        let state = ServerState::initialize_with_mailer(&config, mailer.clone())
            .await
            .expect("state");
        let router = build_app(&state).with_state(state.clone());
        Self {
            state,
            router,
            mailer,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Create a tenant as the platform admin; returns its id
    pub async fn create_tenant(&self, name: &str, domain: &str) -> String {
        let admin = self.admin_token().await;
        let (status, body) = self
            .post(
                "/api/tenants",
                &admin,
                json!({ "name": name, "domain": domain }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "tenant: {body}");
        body["id"].as_str().expect("tenant id").to_string()
    }

    /// Register a user in a tenant; returns `(user_id, token)`
    pub async fn register(&self, email: &str, role: &str, tenant_id: &str) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "password123",
                    "full_name": email.split('@').next().unwrap_or("user"),
                    "tenant_id": tenant_id,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register: {body}");
        (
            body["user"]["id"].as_str().expect("user id").to_string(),
            body["token"].as_str().expect("token").to_string(),
        )
    }
}

pub fn code_of(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}

pub fn code(c: ErrorCode) -> u64 {
    u64::from(c.code())
}
