use async_trait::async_trait;
use diesel::prelude::*;

use ohda_core::requests::{FloatRequest, RequestRepositoryTrait};
use ohda_core::Result;

use super::model::FloatRequestDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::float_requests;

pub struct RequestRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl RequestRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        RequestRepository { pool, writer }
    }
}

#[async_trait]
impl RequestRepositoryTrait for RequestRepository {
    fn list_latest(&self) -> Result<Vec<FloatRequest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = float_requests::table
            .order(float_requests::recorded_at.desc())
            .load::<FloatRequestDB>(&mut conn)
            .into_core()?;

        // Newest entry per float; the rows already come newest-first.
        let mut latest: Vec<FloatRequest> = Vec::new();
        for row in rows {
            if !latest.iter().any(|entry| entry.float_id == row.float_id) {
                latest.push(FloatRequest::from(row));
            }
        }
        Ok(latest)
    }

    fn history_for_float(&self, float_id: i64) -> Result<Vec<FloatRequest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = float_requests::table
            .filter(float_requests::float_id.eq(float_id))
            .order(float_requests::recorded_at.asc())
            .load::<FloatRequestDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(FloatRequest::from).collect())
    }

    fn latest_for_float(&self, float_id: i64) -> Result<Option<FloatRequest>> {
        let mut conn = get_connection(&self.pool)?;
        let row = float_requests::table
            .filter(float_requests::float_id.eq(float_id))
            .order(float_requests::recorded_at.desc())
            .first::<FloatRequestDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(FloatRequest::from))
    }

    async fn append(&self, entry: FloatRequest) -> Result<FloatRequest> {
        self.writer
            .exec(move |conn| {
                let row = FloatRequestDB::from(&entry);
                diesel::insert_into(float_requests::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(entry)
            })
            .await
    }
}
