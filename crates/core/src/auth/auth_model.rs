//! Authentication domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{Error, Result, ValidationError};
use crate::users::{Role, User};

/// What a one-time code was issued for. A code is only accepted for the
/// purpose it was issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    Login,
    Approval,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::Approval => "approval",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "login" => Ok(OtpPurpose::Login),
            "approval" => Ok(OtpPurpose::Approval),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown code purpose '{other}'"
            )))),
        }
    }
}

/// The authenticated identity a transport-layer credential resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
    pub phone_number: String,
    pub full_name: String,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            user_id: user.id.clone(),
            role: user.role,
            phone_number: user.phone_number.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// A session credential handed back after a successful code login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub actor: Actor,
}

/// Hashes a one-time code for at-rest storage. Only the hash is persisted.
pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}
