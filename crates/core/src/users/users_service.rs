use log::debug;
use std::sync::Arc;

use async_trait::async_trait;

use super::users_model::{NewUser, Role, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("user {user_id} does not exist")))
    }

    fn get_by_phone(&self, phone_number: &str) -> Result<User> {
        self.repository
            .find_by_phone(phone_number)?
            .ok_or_else(|| Error::NotFound(format!("no user registered for phone {phone_number}")))
    }

    fn list_by_role(&self, role: Role) -> Result<Vec<User>> {
        self.repository.list_by_role(role)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        if self.repository.find_by_phone(&new_user.phone_number)?.is_some() {
            return Err(Error::Conflict(format!(
                "phone number {} is already registered",
                new_user.phone_number
            )));
        }
        debug!("registering user {} ({})", new_user.full_name, new_user.role);
        self.repository.insert(new_user).await
    }

    async fn ensure_user(&self, new_user: NewUser) -> Result<User> {
        if let Some(existing) = self.repository.find_by_phone(&new_user.phone_number)? {
            return Ok(existing);
        }
        self.create_user(new_user).await
    }
}
