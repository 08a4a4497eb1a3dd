//! Float (ohda) domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle status of a float. The review chain is mirrored onto the float
/// itself; this enum is the single authoritative state machine.
///
/// The serialized values are the Arabic literals the original deployment
/// wrote into its records; they are preserved verbatim so existing data and
/// clients keep working. `Pending` and `AccountantApproved` are never emitted
/// by the current transitions but still parse from historical records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatStatus {
    #[serde(rename = "معلقة")]
    Pending,
    #[serde(rename = "بانتظار مراجعة المحاسب")]
    AwaitingAccountant,
    #[serde(rename = "مقبولة من المحاسب")]
    AccountantApproved,
    #[serde(rename = "بانتظار موافقة الدكتور")]
    AwaitingDoctor,
    #[serde(rename = "مقبولة نهائياً")]
    Approved,
    #[serde(rename = "مفتوحة")]
    Open,
    #[serde(rename = "مغلقة جزئياً")]
    PartiallyClosed,
    #[serde(rename = "مغلقة")]
    Closed,
    #[serde(rename = "مرفوضة من المحاسب")]
    RejectedByAccountant,
    #[serde(rename = "مرفوضة من الدكتور")]
    RejectedByDoctor,
}

impl FloatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatStatus::Pending => "معلقة",
            FloatStatus::AwaitingAccountant => "بانتظار مراجعة المحاسب",
            FloatStatus::AccountantApproved => "مقبولة من المحاسب",
            FloatStatus::AwaitingDoctor => "بانتظار موافقة الدكتور",
            FloatStatus::Approved => "مقبولة نهائياً",
            FloatStatus::Open => "مفتوحة",
            FloatStatus::PartiallyClosed => "مغلقة جزئياً",
            FloatStatus::Closed => "مغلقة",
            FloatStatus::RejectedByAccountant => "مرفوضة من المحاسب",
            FloatStatus::RejectedByDoctor => "مرفوضة من الدكتور",
        }
    }

    /// Still travelling through the approval chain. A float in one of these
    /// statuses blocks a new request for the same employee.
    pub fn is_in_review(&self) -> bool {
        matches!(
            self,
            FloatStatus::Pending
                | FloatStatus::AwaitingAccountant
                | FloatStatus::AccountantApproved
                | FloatStatus::AwaitingDoctor
        )
    }

    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            FloatStatus::RejectedByAccountant | FloatStatus::RejectedByDoctor
        )
    }

    /// Carrying a live balance that a successor float would absorb.
    pub fn is_supersedable(&self) -> bool {
        matches!(self, FloatStatus::Open | FloatStatus::PartiallyClosed)
    }
}

impl fmt::Display for FloatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FloatStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "معلقة" => Ok(FloatStatus::Pending),
            "بانتظار مراجعة المحاسب" => Ok(FloatStatus::AwaitingAccountant),
            "مقبولة من المحاسب" => Ok(FloatStatus::AccountantApproved),
            "بانتظار موافقة الدكتور" => Ok(FloatStatus::AwaitingDoctor),
            "مقبولة نهائياً" => Ok(FloatStatus::Approved),
            "مفتوحة" => Ok(FloatStatus::Open),
            "مغلقة جزئياً" => Ok(FloatStatus::PartiallyClosed),
            "مغلقة" => Ok(FloatStatus::Closed),
            "مرفوضة من المحاسب" => Ok(FloatStatus::RejectedByAccountant),
            "مرفوضة من الدكتور" => Ok(FloatStatus::RejectedByDoctor),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown float status '{other}'"
            )))),
        }
    }
}

/// Domain model for one advance-cash allocation to one employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Float {
    pub id: i64,
    pub employee: String,
    /// Employee-scoped sequence number. Gaps left by rejected floats are
    /// reclaimed by later requests.
    pub sequence: i32,
    pub start_date: NaiveDate,
    /// Opening amount the float was approved for.
    pub amount: Decimal,
    /// Live balance; invoices debit it, replacements credit it. May go
    /// negative when the employee overspends.
    pub current_balance: Decimal,
    /// Snapshot of `current_balance` taken when a successor float was filed.
    pub closing_balance: Decimal,
    pub status: FloatStatus,
    pub closing_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for requesting a new float.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFloat {
    pub employee: String,
    pub amount: Decimal,
}

impl NewFloat {
    pub fn validate(&self) -> Result<()> {
        if self.employee.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "employee".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                self.amount,
            )));
        }
        Ok(())
    }
}

/// Result of creating a float: the float plus the transfer math carried
/// over from its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatCreation {
    pub float: Float,
    /// Balance left on the predecessor float, 0 when there was none.
    pub previous_closing_balance: Decimal,
    /// Cash that actually needs transferring: `amount - previousClosingBalance`.
    /// May be zero or negative; it is still recorded.
    pub transfer_amount: Decimal,
}
