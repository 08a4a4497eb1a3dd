use async_trait::async_trait;

use super::auth_model::{Actor, OtpPurpose, Session};
use crate::errors::Result;
use crate::users::User;

/// Trait for the one-time-code challenge gating logins and approvals.
#[async_trait]
pub trait OtpServiceTrait: Send + Sync {
    /// Generates a fresh code for the user owning `phone_number`, stores its
    /// hash with an expiry, and delivers it out-of-band. Delivery failures
    /// are logged, not surfaced; the challenge is live once persisted.
    async fn issue_code(&self, phone_number: &str, purpose: OtpPurpose) -> Result<()>;

    /// Checks `code` against the stored challenge. A correct code is
    /// consumed; a wrong or expired one leaves the challenge untouched.
    async fn verify_code(&self, phone_number: &str, code: &str, purpose: OtpPurpose) -> Result<()>;
}

/// Mints session credentials for verified users. Token mechanics (JWT,
/// opaque, ...) live outside the core.
pub trait SessionIssuerTrait: Send + Sync {
    fn issue(&self, user: &User) -> Result<Session>;
}

/// Resolves a transport-layer bearer credential to the acting identity.
pub trait IdentityProviderTrait: Send + Sync {
    fn resolve(&self, credential: &str) -> Result<Actor>;
}

/// Trait for the code-based login flow.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn begin_login(&self, phone_number: &str) -> Result<()>;
    async fn complete_login(&self, phone_number: &str, code: &str) -> Result<Session>;
}
