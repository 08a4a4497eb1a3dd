use async_trait::async_trait;
use diesel::prelude::*;

use ohda_core::expenses::{ExpenseKind, ExpenseRecord, ExpenseRepositoryTrait};
use ohda_core::{Error, Result};

use super::model::{InvoiceDB, ReplacementDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{invoices, replacements};

/// Repository spanning the invoice and replacement tables.
pub struct ExpenseRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn find_by_id(&self, record_id: &str) -> Result<Option<ExpenseRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let invoice = invoices::table
            .find(record_id)
            .first::<InvoiceDB>(&mut conn)
            .optional()
            .into_core()?;
        if let Some(row) = invoice {
            return Ok(Some(ExpenseRecord::from(row)));
        }

        let replacement = replacements::table
            .find(record_id)
            .first::<ReplacementDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(replacement.map(ExpenseRecord::from))
    }

    fn list_for_float(
        &self,
        float_id: i64,
        kind: Option<ExpenseKind>,
    ) -> Result<Vec<ExpenseRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut records: Vec<ExpenseRecord> = Vec::new();

        if kind.is_none() || kind == Some(ExpenseKind::Invoice) {
            let rows = invoices::table
                .filter(invoices::float_id.eq(float_id))
                .load::<InvoiceDB>(&mut conn)
                .into_core()?;
            records.extend(rows.into_iter().map(ExpenseRecord::from));
        }
        if kind.is_none() || kind == Some(ExpenseKind::Replacement) {
            let rows = replacements::table
                .filter(replacements::float_id.eq(float_id))
                .load::<ReplacementDB>(&mut conn)
                .into_core()?;
            records.extend(rows.into_iter().map(ExpenseRecord::from));
        }

        records.sort_by_key(|record| record.record_no);
        Ok(records)
    }

    fn last_record_no(&self, float_id: i64) -> Result<Option<i64>> {
        let mut conn = get_connection(&self.pool)?;

        let last_invoice = invoices::table
            .filter(invoices::float_id.eq(float_id))
            .select(diesel::dsl::max(invoices::record_no))
            .first::<Option<i64>>(&mut conn)
            .into_core()?;
        let last_replacement = replacements::table
            .filter(replacements::float_id.eq(float_id))
            .select(diesel::dsl::max(replacements::record_no))
            .first::<Option<i64>>(&mut conn)
            .into_core()?;

        Ok(last_invoice.max(last_replacement))
    }

    async fn insert(&self, record: ExpenseRecord) -> Result<ExpenseRecord> {
        self.writer
            .exec(move |conn| {
                match record.kind {
                    ExpenseKind::Invoice => {
                        let row = InvoiceDB::from(&record);
                        diesel::insert_into(invoices::table)
                            .values(&row)
                            .execute(conn)
                            .into_core()?;
                    }
                    ExpenseKind::Replacement => {
                        let row = ReplacementDB::from(&record);
                        diesel::insert_into(replacements::table)
                            .values(&row)
                            .execute(conn)
                            .into_core()?;
                    }
                }
                Ok(record)
            })
            .await
    }

    async fn update(&self, record: ExpenseRecord) -> Result<ExpenseRecord> {
        self.writer
            .exec(move |conn| {
                let affected = match record.kind {
                    ExpenseKind::Invoice => {
                        let row = InvoiceDB::from(&record);
                        diesel::update(invoices::table.find(record.id.as_str()))
                            .set(&row)
                            .execute(conn)
                            .into_core()?
                    }
                    ExpenseKind::Replacement => {
                        let row = ReplacementDB::from(&record);
                        diesel::update(replacements::table.find(record.id.as_str()))
                            .set(&row)
                            .execute(conn)
                            .into_core()?
                    }
                };
                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "expense record {} does not exist",
                        record.id
                    )));
                }
                Ok(record)
            })
            .await
    }
}
