//! Unit tests for authentication service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{MockTokenRepository, MockUserRepository, TokenRepository};
use crate::services::auth::{AuthService, RegisterCommand};
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};
use crate::services::token::{hash_token, TokenService, TokenServiceConfig};

struct Fixture {
    users: Arc<MockUserRepository>,
    tokens: Arc<TokenService<MockTokenRepository>>,
    service: Arc<AuthService<MockUserRepository, MockTokenRepository>>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..TokenServiceConfig::default()
        },
    ));
    let service = Arc::new(
        AuthService::new(users.clone(), tokens.clone(), Arc::new(BcryptPasswordHasher::new(4)))
            .unwrap(),
    );
    Fixture {
        users,
        tokens,
        service,
    }
}

fn command(email: &str) -> RegisterCommand {
    RegisterCommand {
        email: email.to_string(),
        password: "Password!123".to_string(),
        first_name: "Demo".to_string(),
        last_name: "User".to_string(),
    }
}

#[tokio::test]
async fn test_register_creates_user_with_hashed_password() {
    let f = fixture();
    let user = f.service.register(command("  Demo@Example.com ")).await.unwrap();

    assert_eq!(user.email_normalized, "demo@example.com");
    assert_ne!(user.password_hash, "Password!123");
    assert_eq!(f.users.count().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let f = fixture();
    f.service.register(command("a@b.co")).await.unwrap();

    let result = f.service.register(command("A@B.CO")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert_eq!(f.users.count().await, 1);
}

#[tokio::test]
async fn test_register_validates_input() {
    let f = fixture();

    let mut bad_email = command("not-an-email");
    assert!(matches!(
        f.service.register(bad_email.clone()).await,
        Err(DomainError::Validation(ValidationError::InvalidEmail))
    ));

    bad_email.email = "ok@example.com".to_string();
    bad_email.first_name = "   ".to_string();
    assert!(matches!(
        f.service.register(bad_email).await,
        Err(DomainError::Validation(ValidationError::RequiredField { field })) if field == "firstName"
    ));

    let mut long_name = command("ok@example.com");
    long_name.last_name = "x".repeat(101);
    assert!(matches!(
        f.service.register(long_name).await,
        Err(DomainError::Validation(ValidationError::TooLong { max: 100, .. }))
    ));
    assert_eq!(f.users.count().await, 0);
}

#[tokio::test]
async fn test_register_rejects_malformed_email_domains() {
    let f = fixture();

    for email in ["a@b..c", "a@-.x", "\"@x.y", "a@b.c;drop", "a b@c.com"] {
        assert!(
            matches!(
                f.service.register(command(email)).await,
                Err(DomainError::Validation(ValidationError::InvalidEmail))
            ),
            "{email} should be rejected"
        );
    }
    assert_eq!(f.users.count().await, 0);

    f.service
        .register(command("user.name+tag@example.co.uk"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_returns_tokens() {
    let f = fixture();
    let user = f.service.register(command("demo@example.com")).await.unwrap();

    let response = f
        .service
        .login("demo@example.com", "Password!123")
        .await
        .unwrap();

    assert_eq!(response.expires_in, 3600);
    assert!(!response.refresh_token.is_empty());
    let claims = f.service.verify(&response.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.name, "Demo User");
    let stored = f
        .tokens
        .find_active_refresh_token(&response.refresh_token)
        .await
        .unwrap();
    assert_eq!(stored.user_id, user.id);
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();

    assert!(f.service.login(" DEMO@example.COM ", "Password!123").await.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();

    let wrong_password = f
        .service
        .login("demo@example.com", "wrong")
        .await
        .unwrap_err();
    let unknown_email = f
        .service
        .login("nobody@example.com", "Password!123")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_refresh_rotates_and_old_token_is_single_use() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();
    let login = f.service.login("demo@example.com", "Password!123").await.unwrap();

    let refreshed = f.service.refresh(&login.refresh_token).await.unwrap();
    assert_ne!(refreshed.refresh_token, login.refresh_token);
    assert_eq!(refreshed.expires_in, 3600);
    assert!(f.service.verify(&refreshed.access_token).is_ok());

    let reuse = f.service.refresh(&login.refresh_token).await;
    assert!(matches!(
        reuse,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    assert!(f.service.refresh(&refreshed.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_expired_token() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();
    let login = f.service.login("demo@example.com", "Password!123").await.unwrap();

    let mut record = f
        .tokens
        .repository
        .find_refresh_token(&hash_token(&login.refresh_token))
        .await
        .unwrap()
        .unwrap();
    record.expires_at = Utc::now() - Duration::seconds(1);
    f.tokens.repository.put(record).await;

    assert!(matches!(
        f.service.refresh(&login.refresh_token).await,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_refresh_rejects_unknown_token() {
    let f = fixture();
    assert!(matches!(
        f.service.refresh("garbage").await,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_refresh_fails_when_user_was_removed() {
    let f = fixture();
    let user = f.service.register(command("demo@example.com")).await.unwrap();
    let login = f.service.login("demo@example.com", "Password!123").await.unwrap();

    f.users.remove(user.id).await;

    assert!(matches!(
        f.service.refresh(&login.refresh_token).await,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_logout_is_idempotent_and_revokes() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();
    let login = f.service.login("demo@example.com", "Password!123").await.unwrap();

    f.service.logout(&login.refresh_token).await.unwrap();
    f.service.logout(&login.refresh_token).await.unwrap();
    f.service.logout("never-issued").await.unwrap();

    assert!(f.service.refresh(&login.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_sibling_sessions_survive_logout_and_rotation() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();
    let laptop = f.service.login("demo@example.com", "Password!123").await.unwrap();
    let phone = f.service.login("demo@example.com", "Password!123").await.unwrap();

    f.service.refresh(&laptop.refresh_token).await.unwrap();
    f.service.logout(&laptop.refresh_token).await.unwrap();

    assert!(f.service.refresh(&phone.refresh_token).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refresh_has_exactly_one_winner() {
    let f = fixture();
    f.service.register(command("demo@example.com")).await.unwrap();
    let login = f.service.login("demo@example.com", "Password!123").await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = f.service.clone();
            let token = login.refresh_token.clone();
            tokio::spawn(async move { service.refresh(&token).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert!(matches!(
                e,
                DomainError::Token(TokenError::InvalidRefreshToken)
            )),
        }
    }
    assert_eq!(successes, 1);
}

#[tokio::test]
async fn test_verify_rejects_garbage() {
    let f = fixture();
    assert!(matches!(
        f.service.verify("definitely.not.valid"),
        Err(DomainError::Token(_))
    ));
}

/// bcrypt hasher that counts async hash calls
struct CountingHasher {
    inner: BcryptPasswordHasher,
    hashes: AtomicUsize,
}

#[async_trait]
impl PasswordHasher for CountingHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        self.inner.hash(password).await
    }

    fn hash_blocking(&self, password: &str) -> Result<String, DomainError> {
        self.inner.hash_blocking(password)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        self.inner.verify(password, hash).await
    }
}

#[tokio::test]
async fn test_unknown_email_login_does_not_hash() {
    let hasher = Arc::new(CountingHasher {
        inner: BcryptPasswordHasher::new(4),
        hashes: AtomicUsize::new(0),
    });
    let tokens = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::default(),
    ));
    let service =
        AuthService::new(Arc::new(MockUserRepository::new()), tokens, hasher.clone()).unwrap();

    for _ in 0..2 {
        let result = service.login("nobody@example.com", "whatever").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }
    assert_eq!(hasher.hashes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_new_fails_when_hasher_is_misconfigured() {
    let tokens = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::default(),
    ));
    let result = AuthService::new(
        Arc::new(MockUserRepository::new()),
        tokens,
        Arc::new(BcryptPasswordHasher::new(99)),
    );
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
