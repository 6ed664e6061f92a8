mod common;

use http::{Method, StatusCode};
use serde_json::json;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, code, code_of};
use hr_server::ErrorCode;
use hr_server::auth::{JwtConfig, JwtService};

#[tokio::test]
async fn test_seed_admin_can_login() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, body) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "super_admin");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_token_claims_match_user() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let claims = app
        .state
        .get_jwt_service()
        .validate_token(&token)
        .expect("claims");
    assert_eq!(claims.email, ADMIN_EMAIL);
    assert_eq!(claims.iss, "hr-server");
    assert_eq!(claims.aud, "hr-clients");
    assert_eq!(claims.exp - claims.iat, 480 * 60);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code_of(&body), code(ErrorCode::InvalidCredentials));
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    let expired = JwtService::with_config(JwtConfig {
        expiration_minutes: -120,
        ..app.state.config.jwt.clone()
    });
    let me = app
        .state
        .get_jwt_service()
        .validate_token(&app.admin_token().await)
        .expect("claims");
    let token = expired.generate_token(&me.sub, &me.email).expect("token");

    let (status, body) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code_of(&body), code(ErrorCode::TokenExpired));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .request(Method::GET, "/api/departments", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    app.register("jane@acme.test", "employee", &tenant).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "JANE@acme.test",
                "password": "password123",
                "full_name": "Jane Again",
                "tenant_id": tenant,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), code(ErrorCode::EmailAlreadyRegistered));
}

#[tokio::test]
async fn test_super_admin_cannot_self_register() {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "root@evil.test",
                "password": "password123",
                "full_name": "Root",
                "role": "super_admin",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tenant_roles_are_self_assignable() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, token) = app.register("boss@acme.test", "admin", &tenant).await;

    let (status, body) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["tenant_id"], tenant.as_str());
}

#[tokio::test]
async fn test_short_password_fails_validation() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "a@b.test", "password": "123", "full_name": "A" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(code_of(&body), code(ErrorCode::ValidationFailed));
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, token) = app.register("sam@acme.test", "employee", &tenant).await;

    let (status, body) = app
        .put(
            "/api/me/password",
            &token,
            json!({ "current_password": "wrong-one", "new_password": "newpass123" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code_of(&body), code(ErrorCode::InvalidCredentials));

    let (status, _) = app
        .put(
            "/api/me/password",
            &token,
            json!({ "current_password": "password123", "new_password": "newpass123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    app.login("sam@acme.test", "newpass123").await;
}

#[tokio::test]
async fn test_admin_password_is_not_reset_by_second_boot() {
    let app = TestApp::spawn().await;
    hr_server::services::seed::ensure_super_admin(&app.state)
        .await
        .expect("seed");
    app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
}
