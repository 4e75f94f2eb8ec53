use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{RegisterUser, UpdateUser, User};

/// Repository trait for user persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with an already-hashed password
    async fn create(&self, input: RegisterUser, password_hash: String) -> UserResult<User>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>>;

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User>;

    /// Flip the active flag; returns false when the user does not exist
    async fn set_active(&self, id: Uuid, active: bool) -> UserResult<bool>;
}
