//! Authentication use cases over in-memory repositories

mod common;

use common::TestEnv;
use fame_common::AppError;
use fame_core::{CredentialFailure, DomainError, Role};
use fame_service::dto::{LoginRequest, RegisterRequest};
use fame_service::{AuthService, ServiceError, UserService};

fn alice() -> RegisterRequest {
    RegisterRequest {
        username: "alice".to_string(),
        email: "a@example.com".to_string(),
        password: "secret1".to_string(),
        telegram: None,
    }
}

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
        remember: false,
    }
}

#[tokio::test]
async fn test_register_then_verify() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);

    let registered = auth.register(alice()).await.unwrap();
    assert!(registered.success);
    assert_eq!(registered.user.role, Role::User);

    let user = auth.verify(&registered.token).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::User);
    assert_eq!(env.events.event_types(), vec!["USER_REGISTERED"]);
}

#[tokio::test]
async fn test_duplicate_registration_is_a_conflict() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);
    auth.register(alice()).await.unwrap();

    let err = auth.register(alice()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::UsernameTaken)));
    assert_eq!(err.status_code(), 400);

    let same_email = RegisterRequest {
        username: "alice2".to_string(),
        email: "A@Example.com".to_string(),
        ..alice()
    };
    let err = auth.register(same_email).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::EmailAlreadyExists)));
}

#[tokio::test]
async fn test_username_differing_only_in_case_is_taken() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);
    auth.register(alice()).await.unwrap();

    let shouting = RegisterRequest {
        username: "Alice".to_string(),
        email: "b@example.com".to_string(),
        ..alice()
    };
    let err = auth.register(shouting).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::UsernameTaken)));

    let logged_in = auth.login(login("ALICE", "secret1")).await.unwrap();
    assert_eq!(logged_in.user.username, "alice");
}

#[tokio::test]
async fn test_login_by_username_or_email() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);
    let registered = auth.register(alice()).await.unwrap();

    let by_name = auth.login(login("alice", "secret1")).await.unwrap();
    assert_eq!(by_name.user.id, registered.user.id);

    let by_email = auth.login(login("A@example.com", "secret1")).await.unwrap();
    assert_eq!(by_email.user.id, registered.user.id);

    let user = env.db.user(registered.user.id).unwrap();
    assert!(user.last_login.is_some());
}

#[tokio::test]
async fn test_wrong_password_keeps_last_login() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);
    let registered = auth.register(alice()).await.unwrap();

    let err = auth.login(login("alice", "wrong-password")).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::App(AppError::InvalidCredentials(CredentialFailure::BadPassword))
    ));
    assert_eq!(err.status_code(), 401);
    assert!(env.db.user(registered.user.id).unwrap().last_login.is_none());
}

#[tokio::test]
async fn test_login_failures_share_public_message() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);
    auth.register(alice()).await.unwrap();

    let unknown = auth.login(login("bob", "secret1")).await.unwrap_err();
    let bad = auth.login(login("alice", "nope-nope")).await.unwrap_err();

    assert!(matches!(
        unknown,
        ServiceError::App(AppError::InvalidCredentials(CredentialFailure::UnknownIdentity))
    ));
    assert_eq!(unknown.to_string(), bad.to_string());
}

#[tokio::test]
async fn test_verify_rejects_garbage_and_deleted_users() {
    let env = TestEnv::new();
    let auth = AuthService::new(&env.ctx);

    let err = auth.verify("not-a-token").await.unwrap_err();
    assert_eq!(err.status_code(), 401);

    // Token for an id that has no account
    let ghost = fame_core::Identity::new(999, "ghost", Role::Admin);
    let token = env.ctx.jwt_service().issue(&ghost, false).unwrap();
    let err = auth.verify(&token).await.unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::InvalidToken)));
}

#[tokio::test]
async fn test_bootstrap_admin_is_created_once() {
    let env = TestEnv::new();
    let users = UserService::new(&env.ctx);
    let config = fame_common::AdminBootstrapConfig {
        username: "root".to_string(),
        email: "root@example.com".to_string(),
        password: "rootpass".to_string(),
    };

    let created = users.ensure_bootstrap_admin(&config).await.unwrap().unwrap();
    assert_eq!(created.role, Role::Admin);
    assert!(users.ensure_bootstrap_admin(&config).await.unwrap().is_none());

    let session = AuthService::new(&env.ctx)
        .login(login("root", "rootpass"))
        .await
        .unwrap();
    assert_eq!(session.user.role, Role::Admin);
}
