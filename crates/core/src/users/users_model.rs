//! User domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::OtpPurpose;
use crate::errors::{Error, Result, ValidationError};

/// Role an actor holds inside the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Engineer,
    Manager,
    Doctor,
    Accountant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Engineer => "engineer",
            Role::Manager => "manager",
            Role::Doctor => "doctor",
            Role::Accountant => "accountant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "employee" => Ok(Role::Employee),
            "engineer" => Ok(Role::Engineer),
            "manager" => Ok(Role::Manager),
            "doctor" => Ok(Role::Doctor),
            "accountant" => Ok(Role::Accountant),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown role '{other}'"
            )))),
        }
    }
}

/// A one-time code waiting to be verified. At most one is stored per user;
/// issuing a new code overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCode {
    pub code_hash: String,
    pub purpose: OtpPurpose,
    pub expires_at: DateTime<Utc>,
}

/// Domain model for a user. The phone number is the login key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub phone_number: String,
    pub full_name: String,
    pub role: Role,
    /// Display label for the role, e.g. the Arabic title shown in the UI.
    pub role_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_code: Option<PendingCode>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub phone_number: String,
    pub full_name: String,
    pub role: Role,
    pub role_label: Option<String>,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        if self.phone_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "phoneNumber".to_string(),
            )));
        }
        if self.full_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fullName".to_string(),
            )));
        }
        Ok(())
    }
}
