use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AuthTokens, LoginRequest, RegisterUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for registration, login, and user administration
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt: JwtAuth,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt: JwtAuth) -> Self {
        Self { repository, jwt }
    }

    /// Register a new exhibitor account
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self
            .repository
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailTaken);
        }

        let password_hash = hash_password(&input.password)?;
        self.repository.create(input, password_hash).await
    }

    /// Verify credentials and issue a token pair
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<(User, AuthTokens)> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        if !user.active {
            return Err(UserError::Inactive);
        }

        let tokens = self.issue_tokens(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, tokens))
    }

    /// Fetch a user, requiring the account to still be active.
    ///
    /// This is the live-record check behind every authenticated request: a
    /// valid token for a deactivated account is rejected here.
    pub async fn get_active_user(&self, id: Uuid) -> UserResult<User> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if !user.active {
            return Err(UserError::Inactive);
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self, limit: u64, offset: u64) -> UserResult<Vec<User>> {
        self.repository.list(limit, offset).await
    }

    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Deactivate an account; outstanding tokens stop working immediately
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn deactivate_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.set_active(id, false).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }

    fn issue_tokens(&self, user: &User) -> UserResult<AuthTokens> {
        let id = user.id.to_string();
        let roles = user.roles();

        let access_token = self
            .jwt
            .create_access_token(&id, &user.email, &user.name, &roles)
            .map_err(|e| UserError::Internal(format!("Token creation failed: {}", e)))?;
        let refresh_token = self
            .jwt
            .create_refresh_token(&id, &user.email, &user.name, &roles)
            .map_err(|e| UserError::Internal(format!("Token creation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer",
        })
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::repository::MockUserRepository;
    use axum_helpers::JwtConfig;
    use chrono::Utc;

    fn service(repository: MockUserRepository) -> UserService {
        UserService::new(
            Arc::new(repository),
            JwtAuth::new(&JwtConfig::new("unit-test-secret")),
        )
    }

    fn user_with_password(password: &str, active: bool) -> User {
        User {
            id: Uuid::new_v4(),
            email: "ex@example.com".to_string(),
            name: "Exhibitor".to_string(),
            password_hash: hash_password(password).unwrap(),
            company: None,
            role: UserRole::Exhibitor,
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn login_issues_tokens_for_valid_credentials() {
        let user = user_with_password("hunter2hunter2", true);
        let mut repo = MockUserRepository::new();
        let stored = user.clone();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let (logged_in, tokens) = service(repo)
            .login(LoginRequest {
                email: "ex@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.id, user.id);
        assert_eq!(tokens.token_type, "Bearer");
        assert!(!tokens.access_token.is_empty());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let user = user_with_password("correct-horse", true);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo)
            .login(LoginRequest {
                email: "ex@example.com".to_string(),
                password: "battery-staple".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_inactive_account() {
        let user = user_with_password("hunter2hunter2", false);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo)
            .login(LoginRequest {
                email: "ex@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Inactive));
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let user = user_with_password("hunter2hunter2", true);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo)
            .register(RegisterUser {
                email: "ex@example.com".to_string(),
                name: "Someone".to_string(),
                password: "p4ssw0rd123".to_string(),
                company: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::EmailTaken));
    }

    #[tokio::test]
    async fn get_active_user_rejects_inactive() {
        let user = user_with_password("hunter2hunter2", false);
        let id = user.id;
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(repo).get_active_user(id).await.unwrap_err();
        assert!(matches!(err, UserError::Inactive));
    }
}
