//! Database models for the request audit log.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ohda_core::requests::FloatRequest;

use crate::floats::parse_status_tolerant;
use crate::utils::{format_date, parse_date_tolerant, parse_decimal_tolerant, parse_utc_tolerant};

/// Database model for one request audit entry. Rows are append-only.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::float_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FloatRequestDB {
    pub id: String,
    pub float_id: i64,
    pub employee: String,
    pub sequence: i32,
    pub request_date: String,
    pub new_amount: String,
    pub previous_closing_balance: String,
    pub transfer_amount: String,
    pub status: String,
    pub recorded_at: String,
}

impl From<FloatRequestDB> for FloatRequest {
    fn from(db: FloatRequestDB) -> Self {
        FloatRequest {
            id: db.id,
            float_id: db.float_id,
            employee: db.employee,
            sequence: db.sequence,
            request_date: parse_date_tolerant(&db.request_date, "requestDate"),
            new_amount: parse_decimal_tolerant(&db.new_amount, "newAmount"),
            previous_closing_balance: parse_decimal_tolerant(
                &db.previous_closing_balance,
                "previousClosingBalance",
            ),
            transfer_amount: parse_decimal_tolerant(&db.transfer_amount, "transferAmount"),
            status: parse_status_tolerant(&db.status),
            recorded_at: parse_utc_tolerant(&db.recorded_at, "recordedAt"),
        }
    }
}

impl From<&FloatRequest> for FloatRequestDB {
    fn from(domain: &FloatRequest) -> Self {
        FloatRequestDB {
            id: domain.id.clone(),
            float_id: domain.float_id,
            employee: domain.employee.clone(),
            sequence: domain.sequence,
            request_date: format_date(domain.request_date),
            new_amount: domain.new_amount.to_string(),
            previous_closing_balance: domain.previous_closing_balance.to_string(),
            transfer_amount: domain.transfer_amount.to_string(),
            status: domain.status.as_str().to_string(),
            recorded_at: domain.recorded_at.to_rfc3339(),
        }
    }
}
