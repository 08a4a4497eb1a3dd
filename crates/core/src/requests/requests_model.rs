//! Request workflow domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::floats::FloatStatus;

/// One entry in a float's approval audit trail.
///
/// The trail is append-only: each workflow transition appends a new entry
/// and nothing is ever updated in place. The float's own status stays the
/// authoritative state; the latest entry for a float mirrors it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloatRequest {
    pub id: String,
    pub float_id: i64,
    pub employee: String,
    /// Employee-scoped sequence number, copied from the float.
    pub sequence: i32,
    pub request_date: NaiveDate,
    /// Amount the new float was requested for.
    pub new_amount: Decimal,
    /// Balance carried over from the predecessor float, 0 without one.
    pub previous_closing_balance: Decimal,
    /// `newAmount - previousClosingBalance`; may be zero or negative.
    pub transfer_amount: Decimal,
    pub status: FloatStatus,
    pub recorded_at: DateTime<Utc>,
}

impl FloatRequest {
    /// Builds the follow-up audit entry for a workflow transition.
    pub fn transitioned_to(&self, status: FloatStatus) -> FloatRequest {
        FloatRequest {
            id: Uuid::new_v4().to_string(),
            status,
            recorded_at: Utc::now(),
            ..self.clone()
        }
    }
}
