//! Database models for floats.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ohda_core::floats::{Float, FloatStatus};

use crate::utils::{
    format_date, format_datetime, parse_date_tolerant, parse_datetime_tolerant,
    parse_decimal_tolerant,
};

/// Database model for floats. Amounts and dates are stored as TEXT.
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
#[diesel(table_name = crate::schema::floats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FloatDB {
    pub id: i64,
    pub employee: String,
    pub sequence: i32,
    pub start_date: String,
    pub amount: String,
    pub current_balance: String,
    pub closing_balance: String,
    pub status: String,
    pub closing_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

pub(crate) fn parse_status_tolerant(value: &str) -> FloatStatus {
    FloatStatus::from_str(value).unwrap_or_else(|_| {
        log::error!("unknown float status '{value}' in database, treating as pending");
        FloatStatus::Pending
    })
}

impl From<FloatDB> for Float {
    fn from(db: FloatDB) -> Self {
        Float {
            id: db.id,
            employee: db.employee,
            sequence: db.sequence,
            start_date: parse_date_tolerant(&db.start_date, "startDate"),
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            current_balance: parse_decimal_tolerant(&db.current_balance, "currentBalance"),
            closing_balance: parse_decimal_tolerant(&db.closing_balance, "closingBalance"),
            status: parse_status_tolerant(&db.status),
            closing_date: db
                .closing_date
                .map(|date| parse_date_tolerant(&date, "closingDate")),
            created_at: parse_datetime_tolerant(&db.created_at, "createdAt"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updatedAt"),
        }
    }
}

impl From<&Float> for FloatDB {
    fn from(domain: &Float) -> Self {
        FloatDB {
            id: domain.id,
            employee: domain.employee.clone(),
            sequence: domain.sequence,
            start_date: format_date(domain.start_date),
            amount: domain.amount.to_string(),
            current_balance: domain.current_balance.to_string(),
            closing_balance: domain.closing_balance.to_string(),
            status: domain.status.as_str().to_string(),
            closing_date: domain.closing_date.map(format_date),
            created_at: format_datetime(domain.created_at),
            updated_at: format_datetime(domain.updated_at),
        }
    }
}
