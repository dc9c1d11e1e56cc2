//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn register(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

async fn submit(server: &TestServer, token: &str) -> ApplicationEnvelope {
    let response = server
        .post_auth("/api/applications", token, &SubmitApplicationRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_member(server: &TestServer, token: &str, body: &Value) -> MemberBody {
    let response = server.post_auth("/api/admin/members", token, body).await.unwrap();
    let envelope: MemberEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();
    envelope.member
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_uses_error_shape() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/nothing-here").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert!(!body.success);
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_then_verify() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;

    assert!(auth.success);
    assert!(!auth.token.is_empty());
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.role, "user");

    let response = server.get_auth("/api/auth/verify", &auth.token).await.unwrap();
    let verified: VerifyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(verified.success);
    assert_eq!(verified.user.id, auth.user.id);
    assert_eq!(verified.user.username, request.username);
    assert_eq!(verified.user.role, "user");
}

#[tokio::test]
async fn test_register_duplicate_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!body.success);
}

#[tokio::test]
async fn test_register_validation_reports_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.username = "ab".to_string();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.code, "VALIDATION_ERROR");
    let errors = body.errors.expect("field errors");
    assert!(errors.get("username").is_some());
}

#[tokio::test]
async fn test_login_by_username_and_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, registered) = register(&server).await;

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.id, registered.user.id);

    let by_email = LoginRequest {
        username: request.email.to_uppercase(),
        password: request.password.clone(),
        remember: true,
    };
    let response = server.post("/api/auth/login", &by_email).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.id, registered.user.id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    let wrong_password = LoginRequest {
        username: request.username.clone(),
        password: "not-the-password".to_string(),
        remember: false,
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let wrong: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        username: format!("ghost{}", unique_suffix()),
        password: "whatever1".to_string(),
        remember: false,
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    let missing: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(wrong.message, missing.message);
    assert_eq!(wrong.code, missing.code);
}

#[tokio::test]
async fn test_verify_requires_valid_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/auth/verify").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/api/auth/verify", "not.a.token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_acknowledges() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;

    let response = server
        .post_auth("/api/auth/logout", &auth.token, &json!({}))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);
}

// ============================================================================
// Application Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_one_pending_application_per_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;

    let first = submit(&server, &auth.token).await;
    assert_eq!(first.application.status, "pending");
    assert_eq!(first.application.user_id, auth.user.id);

    let response = server
        .post_auth("/api/applications", &auth.token, &SubmitApplicationRequest::unique())
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!body.success);

    let response = server.get_auth("/api/applications/my", &auth.token).await.unwrap();
    let mine: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine["applications"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_users_cannot_review_applications() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;
    let submitted = submit(&server, &auth.token).await;

    let response = server.get_auth("/api/applications", &auth.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let path = format!("/api/applications/{}/status", submitted.application.id);
    let response = server
        .put_auth(&path, &auth.token, &json!({ "status": "approved" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_approve_materializes_member_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let (_, auth) = register(&server).await;
    let submitted = submit(&server, &auth.token).await.application;

    // Listing with filters finds it, with the applicant embedded
    let path = format!(
        "/api/applications?status=pending&category=all&search={}&limit=5",
        submitted.nickname
    );
    let response = server.get_auth(&path, &admin).await.unwrap();
    let listed: ApplicationListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.page, 1);
    assert_eq!(listed.total_pages, 1);
    assert_eq!(listed.applications[0].id, submitted.id);

    let status_path = format!("/api/applications/{}/status", submitted.id);
    let response = server
        .put_auth(&status_path, &admin, &json!({ "status": "approved" }))
        .await
        .unwrap();
    let approved: ApplicationEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(approved.application.status, "approved");

    let member = approved.member.expect("approval returns the member");
    let handle = submitted.telegram.trim_start_matches('@');
    assert_eq!(member.nickname, submitted.nickname);
    assert_eq!(member.category, "Кодеры");
    assert_eq!(member.username, format!("@{handle}"));
    assert_eq!(member.telegram.as_deref(), Some(handle));

    let response = server.get(&format!("/api/members/{}", member.id)).await.unwrap();
    let public: MemberEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.member.id, member.id);

    // Terminal applications stay terminal
    let response = server
        .put_auth(&status_path, &admin, &json!({ "status": "rejected", "rejectionReason": "late" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!body.success);

    let response = server
        .get_auth(&format!("/api/applications/{}", submitted.id), &admin)
        .await
        .unwrap();
    let detail: ApplicationEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.application.status, "approved");
    assert!(detail.application.rejection_reason.is_none());

    // A new submission is accepted once nothing is pending
    submit(&server, &auth.token).await;
}

#[tokio::test]
async fn test_reject_requires_reason() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let (_, auth) = register(&server).await;
    let submitted = submit(&server, &auth.token).await.application;
    let path = format!("/api/applications/{}/status", submitted.id);

    let response = server
        .put_auth(&path, &admin, &json!({ "status": "rejected", "rejectionReason": "  " }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(&path, &admin, &json!({ "status": "rejected", "rejectionReason": " Not notable " }))
        .await
        .unwrap();
    let rejected: ApplicationEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.application.status, "rejected");
    assert_eq!(rejected.application.rejection_reason.as_deref(), Some("Not notable"));
    assert!(rejected.member.is_none());
}

#[tokio::test]
async fn test_deciding_missing_application() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();

    let response = server
        .put_auth("/api/applications/999999999/status", &admin, &json!({ "status": "approved" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth("/api/applications/abc/status", &admin, &json!({ "status": "approved" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Member Administration Tests
// ============================================================================

#[tokio::test]
async fn test_member_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let nickname = format!("Member{}", unique_suffix());

    let response = server.get_auth("/api/admin/next-id", &admin).await.unwrap();
    let next: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(next["nextId"].as_i64().is_some_and(|id| id > 0));

    let member = create_member(
        &server,
        &admin,
        &json!({ "nickname": nickname, "category": "Media", "telegram": "@media_person" }),
    )
    .await;
    assert_eq!(member.username, "@media_person");
    assert_eq!(member.category, "Медийки");

    let path = format!("/api/admin/members/{}", member.id);
    let response = server
        .put_auth(&path, &admin, &json!({ "verified": true, "pinned": true, "telegram": "" }))
        .await
        .unwrap();
    let updated: MemberEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.member.verified);
    assert!(updated.member.pinned);
    assert!(updated.member.telegram.is_none());
    assert_eq!(updated.member.nickname, nickname);

    let response = server
        .get(&format!("/api/members?category=Медийки&search={nickname}"))
        .await
        .unwrap();
    let listed: MemberListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.members.len(), 1);
    assert_eq!(listed.members[0].id, member.id);

    let response = server.delete_auth(&path, &admin).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_auth(&path, &admin).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_user_cannot_delete_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let (_, auth) = register(&server).await;
    let member = create_member(
        &server,
        &admin,
        &json!({ "nickname": format!("Keep{}", unique_suffix()), "category": "Owner" }),
    )
    .await;

    let path = format!("/api/admin/members/{}", member.id);
    let response = server.delete_auth(&path, &auth.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get(&format!("/api/members/{}", member.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_role_is_checked_before_the_request_is_parsed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;

    let response = server
        .delete_auth("/api/admin/members/abc", &auth.token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.code, "FORBIDDEN");

    let response = server
        .post_auth("/api/admin/members", &auth.token, &json!({ "nickname": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth("/api/applications/1/status", &auth.token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth("/api/applications/zero", &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // No member id and not an image, yet the role check answers first
    let form = Form::new().part(
        "avatar",
        Part::bytes(b"hello".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );
    let response = server
        .post_form("/api/admin/upload-avatar", &auth.token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_upload_avatar() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let member = create_member(
        &server,
        &admin,
        &json!({ "nickname": format!("Face{}", unique_suffix()), "category": "Scam", "scam": true }),
    )
    .await;

    let form = Form::new().text("memberId", member.id.to_string()).part(
        "avatar",
        Part::bytes(PNG_BYTES.to_vec())
            .file_name("face.png")
            .mime_str("image/png")
            .unwrap(),
    );
    let response = server
        .post_form("/api/admin/upload-avatar", &admin, form)
        .await
        .unwrap();
    let uploaded: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let expected = format!("avatar{}.png", member.id);
    assert_eq!(uploaded["filename"], expected.as_str());
    assert_eq!(uploaded["path"], format!("/img/{expected}").as_str());

    let response = server.get(&format!("/img/{expected}")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/api/members/{}", member.id)).await.unwrap();
    let public: MemberEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.member.avatar, Some(format!("img/{expected}")));

    // Text files are refused whatever their name
    let form = Form::new().text("memberId", member.id.to_string()).part(
        "avatar",
        Part::bytes(b"hello".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );
    let response = server
        .post_form("/api/admin/upload-avatar", &admin, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Deleting the member removes the file
    let response = server
        .delete_auth(&format!("/api/admin/members/{}", member.id), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.get(&format!("/img/{expected}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_stats() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let (_, auth) = register(&server).await;

    let response = server.get_auth("/api/admin/stats", &admin).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let stats = &body["stats"];
    assert!(stats["totalUsers"].as_i64().is_some_and(|n| n >= 2));
    assert_eq!(stats["membersByCategory"].as_array().map(Vec::len), Some(9));

    let response = server.get_auth("/api/admin/stats", &auth.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}
