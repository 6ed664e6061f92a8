mod common;

use chrono::DateTime;
use http::StatusCode;
use serde_json::json;

use common::{TestApp, code, code_of};
use hr_server::ErrorCode;

#[tokio::test]
async fn test_clock_in_and_out_sequence() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, token) = app.register("eve@acme.test", "employee", &tenant).await;

    let (status, body) = app.post("/api/attendance/clock-out", &token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), code(ErrorCode::NotClockedIn));

    let (status, body) = app.post("/api/attendance/clock-in", &token, json!({})).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Clocked in successfully");

    let (status, body) = app.post("/api/attendance/clock-in", &token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), code(ErrorCode::AlreadyClockedIn));

    let (status, _) = app.post("/api/attendance/clock-out", &token, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/api/attendance/clock-out", &token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), code(ErrorCode::AlreadyClockedOut));

    let (status, today) = app.get("/api/attendance/today", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(today["status"], "present");
    let stamp = |field: &str| {
        let raw = today[field].as_str().expect("timestamp");
        DateTime::parse_from_rfc3339(raw).expect("rfc3339")
    };
    assert!(stamp("check_out") > stamp("check_in"));

    let (status, records) = app.get("/api/attendance", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_today_is_null_before_clock_in() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, token) = app.register("eve@acme.test", "employee", &tenant).await;

    let (status, body) = app.get("/api/attendance/today", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_employee_sees_only_own_attendance() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, hr) = app.register("hr@acme.test", "hr", &tenant).await;
    let (eve_id, eve) = app.register("eve@acme.test", "employee", &tenant).await;
    let (bob_id, _) = app.register("bob@acme.test", "employee", &tenant).await;

    for user_id in [&eve_id, &bob_id] {
        let (status, body) = app
            .post(
                "/api/attendance",
                &hr,
                json!({ "user_id": user_id, "date": "2024-03-11", "status": "absent" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let (_, own) = app
        .get(&format!("/api/attendance?user_id={bob_id}"), &eve)
        .await;
    let own = own.as_array().expect("list");
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["user_id"], eve_id.as_str());

    let (_, all) = app
        .get("/api/attendance?start_date=2024-03-01&end_date=2024-03-31", &hr)
        .await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_manual_mark_replaces_day() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, hr) = app.register("hr@acme.test", "hr", &tenant).await;
    let (eve_id, _) = app.register("eve@acme.test", "employee", &tenant).await;

    for status in ["absent", "on-leave"] {
        let (code, _) = app
            .post(
                "/api/attendance",
                &hr,
                json!({ "user_id": eve_id, "date": "2024-03-12", "status": status }),
            )
            .await;
        assert_eq!(code, StatusCode::OK);
    }
    let (_, days) = app
        .get(&format!("/api/attendance?user_id={eve_id}"), &hr)
        .await;
    let days = days.as_array().expect("list");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["status"], "on-leave");
}

#[tokio::test]
async fn test_employee_cannot_mark_attendance() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (eve_id, eve) = app.register("eve@acme.test", "employee", &tenant).await;

    let (status, body) = app
        .post(
            "/api/attendance",
            &eve,
            json!({ "user_id": eve_id, "date": "2024-03-12", "status": "present" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code_of(&body), code(ErrorCode::PermissionDenied));
}

async fn leave_type(app: &TestApp, token: &str) -> String {
    let (status, body) = app
        .post(
            "/api/leave-types",
            token,
            json!({ "name": "Annual", "code": "AL", "days_allowed": 20 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn test_leave_visibility_by_role() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, hr) = app.register("hr@acme.test", "hr", &tenant).await;
    let (_, eve) = app.register("eve@acme.test", "employee", &tenant).await;
    let (_, bob) = app.register("bob@acme.test", "employee", &tenant).await;
    let lt = leave_type(&app, &hr).await;

    for token in [&eve, &bob] {
        let (status, body) = app
            .post(
                "/api/leave-requests",
                token,
                json!({ "leave_type_id": lt, "start_date": "2024-04-01", "end_date": "2024-04-02" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], "pending");
    }

    let (_, own) = app.get("/api/leave-requests", &eve).await;
    assert_eq!(own.as_array().map(Vec::len), Some(1));

    let (_, all) = app.get("/api/leave-requests?status=pending", &hr).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (_, manager) = app.register("mo@acme.test", "manager", &tenant).await;
    let (_, team) = app.get("/api/leave-requests", &manager).await;
    assert_eq!(team.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_leave_date_rules() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, hr) = app.register("hr@acme.test", "hr", &tenant).await;
    let lt = leave_type(&app, &hr).await;

    let (status, body) = app
        .post(
            "/api/leave-requests",
            &hr,
            json!({ "leave_type_id": lt, "start_date": "2024-04-05", "end_date": "2024-04-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), code(ErrorCode::InvalidDateRange));

    let (status, _) = app
        .post(
            "/api/leave-requests",
            &hr,
            json!({ "leave_type_id": lt, "start_date": "04/01/2024", "end_date": "2024-04-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/leave-requests",
            &hr,
            json!({ "leave_type_id": "ffffffffffffffffffffffff", "start_date": "2024-04-01", "end_date": "2024-04-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), code(ErrorCode::LeaveTypeNotFound));
}

#[tokio::test]
async fn test_leave_decision_overwrites() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, manager) = app.register("mo@acme.test", "manager", &tenant).await;
    let (_, hr) = app.register("hr@acme.test", "hr", &tenant).await;
    let (_, eve) = app.register("eve@acme.test", "employee", &tenant).await;
    let lt = leave_type(&app, &hr).await;

    let (_, req) = app
        .post(
            "/api/leave-requests",
            &eve,
            json!({ "leave_type_id": lt, "start_date": "2024-04-01", "end_date": "2024-04-01" }),
        )
        .await;
    let id = req["id"].as_str().expect("id");

    let (status, _) = app
        .put(&format!("/api/leave-requests/{id}/approve"), &eve, json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let (status, body) = app
            .put(&format!("/api/leave-requests/{id}/approve"), &manager, json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Leave approved");
    }

    let (status, body) = app
        .put(&format!("/api/leave-requests/{id}/reject"), &hr, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Leave rejected");

    let (_, list) = app.get("/api/leave-requests", &eve).await;
    assert_eq!(list[0]["status"], "rejected");
}

#[tokio::test]
async fn test_dashboard_without_employees() {
    let app = TestApp::spawn().await;
    let tenant = app.create_tenant("Acme", "acme.test").await;
    let (_, hr) = app.register("hr@acme.test", "hr", &tenant).await;

    let (status, stats) = app.get("/api/dashboard/stats", &hr).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_employees"], 0);
    assert_eq!(stats["present_today"], 0);
    assert_eq!(stats["attendance_rate"], 0.0);
}
