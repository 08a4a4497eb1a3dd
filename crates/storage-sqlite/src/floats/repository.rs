use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;

use ohda_core::floats::{Float, FloatRepositoryTrait, FloatStatus};
use ohda_core::{Error, Result};

use super::model::{parse_status_tolerant, FloatDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::floats;
use crate::utils::{format_datetime, parse_decimal_tolerant};

pub struct FloatRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl FloatRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        FloatRepository { pool, writer }
    }
}

#[async_trait]
impl FloatRepositoryTrait for FloatRepository {
    fn find_by_id(&self, float_id: i64) -> Result<Option<Float>> {
        let mut conn = get_connection(&self.pool)?;
        let row = floats::table
            .find(float_id)
            .first::<FloatDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Float::from))
    }

    fn list(&self) -> Result<Vec<Float>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = floats::table
            .order(floats::id.asc())
            .load::<FloatDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Float::from).collect())
    }

    fn list_by_employee(&self, employee: &str) -> Result<Vec<Float>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = floats::table
            .filter(floats::employee.eq(employee))
            .order(floats::id.asc())
            .load::<FloatDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Float::from).collect())
    }

    fn max_id(&self) -> Result<Option<i64>> {
        let mut conn = get_connection(&self.pool)?;
        floats::table
            .select(diesel::dsl::max(floats::id))
            .first::<Option<i64>>(&mut conn)
            .into_core()
    }

    fn latest_supersedable(&self, employee: &str) -> Result<Option<Float>> {
        let mut conn = get_connection(&self.pool)?;
        let row = floats::table
            .filter(floats::employee.eq(employee))
            .filter(floats::status.eq_any([
                FloatStatus::Open.as_str(),
                FloatStatus::PartiallyClosed.as_str(),
            ]))
            .order(floats::id.desc())
            .first::<FloatDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Float::from))
    }

    fn latest_partially_closed_before(
        &self,
        employee: &str,
        before_id: i64,
    ) -> Result<Option<Float>> {
        let mut conn = get_connection(&self.pool)?;
        let row = floats::table
            .filter(floats::employee.eq(employee))
            .filter(floats::status.eq(FloatStatus::PartiallyClosed.as_str()))
            .filter(floats::id.lt(before_id))
            .order(floats::id.desc())
            .first::<FloatDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Float::from))
    }

    async fn insert(&self, float: Float) -> Result<Float> {
        self.writer
            .exec(move |conn| {
                let row = FloatDB::from(&float);
                diesel::insert_into(floats::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                let stored = floats::table
                    .find(float.id)
                    .first::<FloatDB>(conn)
                    .into_core()?;
                Ok(Float::from(stored))
            })
            .await
    }

    async fn update(&self, float: Float) -> Result<Float> {
        self.writer
            .exec(move |conn| {
                let row = FloatDB::from(&float);
                let affected = diesel::update(floats::table.find(float.id))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "float {} does not exist",
                        float.id
                    )));
                }
                let stored = floats::table
                    .find(float.id)
                    .first::<FloatDB>(conn)
                    .into_core()?;
                Ok(Float::from(stored))
            })
            .await
    }

    async fn apply_balance_delta(&self, float_id: i64, delta: Decimal) -> Result<Float> {
        self.writer
            .exec(move |conn| {
                let row = floats::table
                    .find(float_id)
                    .first::<FloatDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound(format!("float {float_id} does not exist")))?;

                if parse_status_tolerant(&row.status) != FloatStatus::Open {
                    return Err(Error::State(format!("float {float_id} is not open")));
                }

                let balance =
                    parse_decimal_tolerant(&row.current_balance, "currentBalance") + delta;
                diesel::update(floats::table.find(float_id))
                    .set((
                        floats::current_balance.eq(balance.to_string()),
                        floats::updated_at.eq(format_datetime(Utc::now().naive_utc())),
                    ))
                    .execute(conn)
                    .into_core()?;

                let stored = floats::table
                    .find(float_id)
                    .first::<FloatDB>(conn)
                    .into_core()?;
                Ok(Float::from(stored))
            })
            .await
    }
}
