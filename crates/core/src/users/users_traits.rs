use async_trait::async_trait;

use super::users_model::{NewUser, PendingCode, Role, User};
use crate::errors::Result;

/// Trait defining the contract for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>>;
    fn find_by_name(&self, full_name: &str) -> Result<Option<User>>;
    fn list_by_role(&self, role: Role) -> Result<Vec<User>>;
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    /// Stores a pending one-time code on the user, replacing any prior one.
    async fn set_pending_code(&self, user_id: &str, code: PendingCode) -> Result<()>;
    async fn clear_pending_code(&self, user_id: &str) -> Result<()>;
}

/// Trait defining the contract for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_by_phone(&self, phone_number: &str) -> Result<User>;
    fn list_by_role(&self, role: Role) -> Result<Vec<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    /// Registers the user unless one with the same phone number already
    /// exists. Used to seed the fixed reviewer accounts at startup.
    async fn ensure_user(&self, new_user: NewUser) -> Result<User>;
}
