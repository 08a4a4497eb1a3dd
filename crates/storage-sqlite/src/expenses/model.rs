//! Database models for invoices and replacements.
//!
//! The two collections have the same shape and share the per-float record
//! number space; only the table differs.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ohda_core::expenses::{ExpenseKind, ExpenseRecord};
use ohda_core::files::StoredFileRef;

use crate::utils::{
    format_date, format_datetime, parse_date_tolerant, parse_datetime_tolerant,
    parse_decimal_tolerant,
};

/// Database model for invoices.
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
#[diesel(table_name = crate::schema::invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDB {
    pub id: String,
    pub record_no: i64,
    pub float_id: i64,
    pub date: String,
    pub name: String,
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub amount: String,
    pub file_name: Option<String>,
    pub original_file_name: Option<String>,
    pub file_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for replacements.
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
#[diesel(table_name = crate::schema::replacements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ReplacementDB {
    pub id: String,
    pub record_no: i64,
    pub float_id: i64,
    pub date: String,
    pub name: String,
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub amount: String,
    pub file_name: Option<String>,
    pub original_file_name: Option<String>,
    pub file_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn file_ref(
    file_name: Option<String>,
    original_file_name: Option<String>,
    file_url: Option<String>,
) -> Option<StoredFileRef> {
    file_name.map(|key| StoredFileRef {
        key,
        original_name: original_file_name.unwrap_or_default(),
        url: file_url,
    })
}

macro_rules! expense_conversions {
    ($db:ident, $kind:expr) => {
        impl From<$db> for ExpenseRecord {
            fn from(db: $db) -> Self {
                ExpenseRecord {
                    id: db.id,
                    record_no: db.record_no,
                    float_id: db.float_id,
                    kind: $kind,
                    date: parse_date_tolerant(&db.date, "date"),
                    name: db.name,
                    description: db.description,
                    project_name: db.project_name,
                    amount: parse_decimal_tolerant(&db.amount, "amount"),
                    file: file_ref(db.file_name, db.original_file_name, db.file_url),
                    created_at: parse_datetime_tolerant(&db.created_at, "createdAt"),
                    updated_at: parse_datetime_tolerant(&db.updated_at, "updatedAt"),
                }
            }
        }

        impl From<&ExpenseRecord> for $db {
            fn from(domain: &ExpenseRecord) -> Self {
                $db {
                    id: domain.id.clone(),
                    record_no: domain.record_no,
                    float_id: domain.float_id,
                    date: format_date(domain.date),
                    name: domain.name.clone(),
                    description: domain.description.clone(),
                    project_name: domain.project_name.clone(),
                    amount: domain.amount.to_string(),
                    file_name: domain.file.as_ref().map(|f| f.key.clone()),
                    original_file_name: domain.file.as_ref().map(|f| f.original_name.clone()),
                    file_url: domain.file.as_ref().and_then(|f| f.url.clone()),
                    created_at: format_datetime(domain.created_at),
                    updated_at: format_datetime(domain.updated_at),
                }
            }
        }
    };
}

expense_conversions!(InvoiceDB, ExpenseKind::Invoice);
expense_conversions!(ReplacementDB, ExpenseKind::Replacement);
