use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use ohda_core::users::{NewUser, PendingCode, Role, User, UserRepositoryTrait};
use ohda_core::{Error, Result};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::utils::format_datetime;

pub struct UserRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::phone_number.eq(phone_number))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn find_by_name(&self, full_name: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::full_name.eq(full_name))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn list_by_role(&self, role: Role) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .filter(users::role.eq(role.as_str()))
            .order(users::full_name.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn| {
                let now = format_datetime(Utc::now().naive_utc());
                let row = UserDB {
                    id: Uuid::new_v4().to_string(),
                    phone_number: new_user.phone_number,
                    full_name: new_user.full_name,
                    role: new_user.role.as_str().to_string(),
                    role_label: new_user.role_label,
                    otp_hash: None,
                    otp_purpose: None,
                    otp_expires_at: None,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(users::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                let stored = users::table
                    .find(row.id.as_str())
                    .first::<UserDB>(conn)
                    .into_core()?;
                Ok(User::from(stored))
            })
            .await
    }

    async fn set_pending_code(&self, user_id: &str, code: PendingCode) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(users::table.find(user_id.as_str()))
                    .set((
                        users::otp_hash.eq(Some(code.code_hash.clone())),
                        users::otp_purpose.eq(Some(code.purpose.as_str().to_string())),
                        users::otp_expires_at.eq(Some(code.expires_at.to_rfc3339())),
                        users::updated_at.eq(format_datetime(Utc::now().naive_utc())),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("user {user_id} does not exist")));
                }
                Ok(())
            })
            .await
    }

    async fn clear_pending_code(&self, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(users::table.find(user_id.as_str()))
                    .set((
                        users::otp_hash.eq(None::<String>),
                        users::otp_purpose.eq(None::<String>),
                        users::otp_expires_at.eq(None::<String>),
                        users::updated_at.eq(format_datetime(Utc::now().naive_utc())),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("user {user_id} does not exist")));
                }
                Ok(())
            })
            .await
    }
}
