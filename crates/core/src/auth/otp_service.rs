use log::{debug, warn};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;

use super::auth_model::{hash_code, OtpPurpose};
use super::auth_traits::OtpServiceTrait;
use crate::constants::{OTP_CODE_LENGTH, OTP_TTL_MINUTES};
use crate::errors::{AuthError, Error, Result};
use crate::sms::SmsChannelTrait;
use crate::users::{PendingCode, UserRepositoryTrait};

/// Service issuing and verifying one-time codes, keyed by phone number.
pub struct OtpService {
    users: Arc<dyn UserRepositoryTrait>,
    sms: Arc<dyn SmsChannelTrait>,
}

impl OtpService {
    pub fn new(users: Arc<dyn UserRepositoryTrait>, sms: Arc<dyn SmsChannelTrait>) -> Self {
        Self { users, sms }
    }

    fn generate_code() -> String {
        let n = rand::thread_rng().gen_range(0..10u32.pow(OTP_CODE_LENGTH));
        format!("{:0width$}", n, width = OTP_CODE_LENGTH as usize)
    }
}

#[async_trait]
impl OtpServiceTrait for OtpService {
    async fn issue_code(&self, phone_number: &str, purpose: OtpPurpose) -> Result<()> {
        let user = self
            .users
            .find_by_phone(phone_number)?
            .ok_or_else(|| Error::NotFound(format!("no user registered for phone {phone_number}")))?;

        let code = Self::generate_code();
        let challenge = PendingCode {
            code_hash: hash_code(&code),
            purpose,
            expires_at: Utc::now() + Duration::minutes(OTP_TTL_MINUTES),
        };
        self.users.set_pending_code(&user.id, challenge).await?;
        debug!("issued {} code for {}", purpose, phone_number);

        let message = format!("رمز التحقق الخاص بك هو {code}");
        if let Err(err) = self.sms.send(phone_number, &message).await {
            warn!("failed to deliver verification code to {phone_number}: {err}");
        }
        Ok(())
    }

    async fn verify_code(&self, phone_number: &str, code: &str, purpose: OtpPurpose) -> Result<()> {
        let user = self
            .users
            .find_by_phone(phone_number)?
            .ok_or_else(|| Error::NotFound(format!("no user registered for phone {phone_number}")))?;

        let challenge = user
            .pending_code
            .ok_or(Error::Auth(AuthError::CodeNotIssued))?;

        if challenge.purpose != purpose {
            return Err(Error::Auth(AuthError::CodeInvalid));
        }
        if Utc::now() > challenge.expires_at {
            return Err(Error::Auth(AuthError::CodeExpired));
        }
        if hash_code(code) != challenge.code_hash {
            return Err(Error::Auth(AuthError::CodeInvalid));
        }

        // Single use: a verified code is gone.
        self.users.clear_pending_code(&user.id).await?;
        Ok(())
    }
}
