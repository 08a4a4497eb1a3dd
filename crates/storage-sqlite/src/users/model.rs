//! Database models for users.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ohda_core::auth::OtpPurpose;
use ohda_core::users::{PendingCode, Role, User};

use crate::utils::{format_datetime, parse_datetime_tolerant, parse_utc_tolerant};

/// Database model for users. The pending one-time code is flattened into
/// three nullable columns.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub phone_number: String,
    pub full_name: String,
    pub role: String,
    pub role_label: Option<String>,
    pub otp_hash: Option<String>,
    pub otp_purpose: Option<String>,
    pub otp_expires_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_role_tolerant(value: &str) -> Role {
    Role::from_str(value).unwrap_or_else(|_| {
        log::error!("unknown role '{value}' in database, treating as employee");
        Role::Employee
    })
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        let pending_code = match (db.otp_hash, db.otp_purpose, db.otp_expires_at) {
            (Some(code_hash), Some(purpose), Some(expires_at)) => {
                OtpPurpose::from_str(&purpose).ok().map(|purpose| PendingCode {
                    code_hash,
                    purpose,
                    expires_at: parse_utc_tolerant(&expires_at, "otpExpiresAt"),
                })
            }
            _ => None,
        };

        User {
            id: db.id,
            phone_number: db.phone_number,
            full_name: db.full_name,
            role: parse_role_tolerant(&db.role),
            role_label: db.role_label,
            pending_code,
            created_at: parse_datetime_tolerant(&db.created_at, "createdAt"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updatedAt"),
        }
    }
}

impl From<&User> for UserDB {
    fn from(domain: &User) -> Self {
        UserDB {
            id: domain.id.clone(),
            phone_number: domain.phone_number.clone(),
            full_name: domain.full_name.clone(),
            role: domain.role.as_str().to_string(),
            role_label: domain.role_label.clone(),
            otp_hash: domain
                .pending_code
                .as_ref()
                .map(|code| code.code_hash.clone()),
            otp_purpose: domain
                .pending_code
                .as_ref()
                .map(|code| code.purpose.as_str().to_string()),
            otp_expires_at: domain
                .pending_code
                .as_ref()
                .map(|code| code.expires_at.to_rfc3339()),
            created_at: format_datetime(domain.created_at),
            updated_at: format_datetime(domain.updated_at),
        }
    }
}
