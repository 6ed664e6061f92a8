mod common;

use http::StatusCode;
use serde_json::json;

use common::{TestApp, code, code_of};
use hr_server::ErrorCode;

#[tokio::test]
async fn test_records_are_invisible_across_tenants() {
    let app = TestApp::spawn().await;
    let acme = app.create_tenant("Acme", "acme.test").await;
    let globex = app.create_tenant("Globex", "globex.test").await;
    let (_, acme_hr) = app.register("hr@acme.test", "hr", &acme).await;
    let (_, globex_hr) = app.register("hr@globex.test", "hr", &globex).await;

    let (status, dept) = app
        .post("/api/departments", &acme_hr, json!({ "name": "Engineering", "code": "ENG" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{dept}");
    let id = dept["id"].as_str().expect("id");

    let (status, body) = app.get(&format!("/api/departments/{id}"), &globex_hr).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), code(ErrorCode::DepartmentNotFound));

    let (status, _) = app
        .put(&format!("/api/departments/{id}"), &globex_hr, json!({ "name": "Taken" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.get("/api/departments", &globex_hr).await;
    assert_eq!(list.as_array().map(Vec::len), Some(0));

    // Platform admin sees every tenant
    let admin = app.admin_token().await;
    let (status, _) = app.get(&format!("/api/departments/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_policy_denies_employee_writes() {
    let app = TestApp::spawn().await;
    let acme = app.create_tenant("Acme", "acme.test").await;
    let (_, eve) = app.register("eve@acme.test", "employee", &acme).await;
    let (_, manager) = app.register("mo@acme.test", "manager", &acme).await;

    let (status, body) = app
        .post("/api/departments", &eve, json!({ "name": "Sales", "code": "SAL" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code_of(&body), code(ErrorCode::PermissionDenied));

    let (status, _) = app
        .post("/api/departments", &manager, json!({ "name": "Sales", "code": "SAL" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/tenants", &manager).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/departments", &eve).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_employee_crud_and_duplicates() {
    let app = TestApp::spawn().await;
    let acme = app.create_tenant("Acme", "acme.test").await;
    let (_, hr) = app.register("hr@acme.test", "hr", &acme).await;

    let payload = json!({
        "employee_id": "E-001",
        "full_name": "Eve Adams",
        "email": "eve@acme.test",
    });
    let (status, emp) = app.post("/api/employees", &hr, payload.clone()).await;
    assert_eq!(status, StatusCode::OK, "{emp}");
    assert_eq!(emp["status"], "active");
    assert_eq!(emp["employment_type"], "full-time");

    let (status, body) = app.post("/api/employees", &hr, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), code(ErrorCode::EmployeeAlreadyExists));

    let (_, found) = app.get("/api/employees?search=ADAMS", &hr).await;
    assert_eq!(found.as_array().map(Vec::len), Some(1));

    let id = emp["id"].as_str().expect("id");
    let (status, _) = app.delete(&format!("/api/employees/{id}"), &hr).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/api/employees/{id}"), &hr).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_tenant_on_register() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .request(
            http::Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "x@nowhere.test",
                "password": "password123",
                "full_name": "X",
                "tenant_id": "ffffffffffffffffffffffff",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), code(ErrorCode::TenantNotFound));
}

#[tokio::test]
async fn test_onboarding_flow() {
    let app = TestApp::spawn().await;
    let acme = app.create_tenant("Acme", "acme.test").await;
    let (_, admin) = app.register("boss@acme.test", "admin", &acme).await;

    let (_, status) = app.get("/api/onboarding/status", &admin).await;
    assert_eq!(status["departments_created"], false);
    assert_eq!(status["completed"], false);

    let (code_, depts) = app
        .post(
            "/api/onboarding/departments",
            &admin,
            json!({ "departments": [
                { "name": "Engineering", "code": "ENG" },
                { "name": "", "code": "BAD" }
            ] }),
        )
        .await;
    assert_eq!(code_, StatusCode::OK);
    assert_eq!(depts["departments"].as_array().map(Vec::len), Some(1));
    assert_eq!(depts["failed"][0]["index"], 1);

    let invites = json!({ "employees": [
        { "full_name": "Eve Adams", "email": "eve@acme.test" },
        { "full_name": "Bob Brown", "email": "bob@acme.test", "role": "manager" }
    ] });
    let (_, first) = app.post("/api/onboarding/employees", &admin, invites.clone()).await;
    assert_eq!(first["employees"].as_array().map(Vec::len), Some(2));
    // No mail settings: credentials come back to the admin
    assert_eq!(first["credentials"].as_array().map(Vec::len), Some(2));
    assert_eq!(first["emails_queued"], 0);

    let (_, again) = app.post("/api/onboarding/employees", &admin, invites).await;
    assert_eq!(again["employees"].as_array().map(Vec::len), Some(0));
    assert_eq!(again["skipped"].as_array().map(Vec::len), Some(2));

    let password = first["credentials"][0]["temporary_password"]
        .as_str()
        .expect("password");
    let email = first["credentials"][0]["email"].as_str().expect("email");
    let token = app.login(email, password).await;
    let (_, me) = app.get("/api/auth/me", &token).await;
    assert_eq!(me["user"]["must_change_password"], true);

    let (_, flag) = app.post("/api/onboarding/skip", &admin, json!({})).await;
    assert_eq!(flag, json!({ "completed": true, "skipped": true }));
    let (_, status) = app.get("/api/onboarding/status", &admin).await;
    assert_eq!(status["departments_created"], true);
    assert_eq!(status["employees_invited"], true);
    assert_eq!(status["skipped"], true);
}

#[tokio::test]
async fn test_malformed_bulk_body_uses_error_envelope() {
    let app = TestApp::spawn().await;
    let acme = app.create_tenant("Acme", "acme.test").await;
    let (_, admin) = app.register("boss@acme.test", "admin", &acme).await;

    for uri in ["/api/onboarding/departments", "/api/onboarding/employees"] {
        let (status, body) = app.post(uri, &admin, json!({ "items": "nope" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code_of(&body), code(ErrorCode::ValidationFailed));
        assert!(body["message"].is_string());
    }

    let (status, body) = app.post("/api/timesheets/submit", &admin, json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(code_of(&body), code(ErrorCode::ValidationFailed));
}
