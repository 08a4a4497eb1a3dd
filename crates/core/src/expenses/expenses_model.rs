//! Expense record domain models.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::files::StoredFileRef;

/// The two kinds of expense records. Invoices debit the float's balance,
/// replacements credit it. Both draw record numbers from the same per-float
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Invoice,
    Replacement,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Invoice => "invoice",
            ExpenseKind::Replacement => "replacement",
        }
    }

    /// Collection name used in object keys and change topics.
    pub fn collection(&self) -> &'static str {
        match self {
            ExpenseKind::Invoice => "invoices",
            ExpenseKind::Replacement => "replacements",
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model for an invoice or replacement posted against a float.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    /// Per-float record number, shared between invoices and replacements.
    pub record_no: i64,
    pub float_id: i64,
    pub kind: ExpenseKind,
    pub date: NaiveDate,
    pub name: String,
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<StoredFileRef>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for posting an invoice or replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub float_id: i64,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
    pub name: String,
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub amount: Decimal,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
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

/// Input model for correcting an existing record. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub amount: Option<Decimal>,
}
