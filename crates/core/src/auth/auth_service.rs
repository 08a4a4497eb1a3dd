use std::sync::Arc;

use async_trait::async_trait;

use super::auth_model::{OtpPurpose, Session};
use super::auth_traits::{AuthServiceTrait, OtpServiceTrait, SessionIssuerTrait};
use crate::errors::{Error, Result};
use crate::users::UserRepositoryTrait;

/// Code-based login: a code is sent to the registered phone, and verifying
/// it yields a session credential.
pub struct AuthService {
    users: Arc<dyn UserRepositoryTrait>,
    otp: Arc<dyn OtpServiceTrait>,
    sessions: Arc<dyn SessionIssuerTrait>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        otp: Arc<dyn OtpServiceTrait>,
        sessions: Arc<dyn SessionIssuerTrait>,
    ) -> Self {
        Self { users, otp, sessions }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn begin_login(&self, phone_number: &str) -> Result<()> {
        self.otp.issue_code(phone_number, OtpPurpose::Login).await
    }

    async fn complete_login(&self, phone_number: &str, code: &str) -> Result<Session> {
        self.otp
            .verify_code(phone_number, code, OtpPurpose::Login)
            .await?;
        let user = self
            .users
            .find_by_phone(phone_number)?
            .ok_or_else(|| Error::NotFound(format!("no user registered for phone {phone_number}")))?;
        self.sessions.issue(&user)
    }
}
