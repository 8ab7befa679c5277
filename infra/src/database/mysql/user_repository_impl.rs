//! MySQL implementation of the UserRepository trait.
//!
//! Multi-row operations (email change, account deletion) lock the user row
//! with `SELECT ... FOR UPDATE` and commit in a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row, Transaction};

use mz_core::domain::entities::user::User;
use mz_core::errors::DomainError;
use mz_core::repositories::{EmailChangeCommit, UserRepository};

use super::{column_error, db_error};

const USER_COLUMNS: &str =
    "id, email, password, name, avatar_url, auth_provider, is_admin, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: row.try_get("id").map_err(column_error("id"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row.try_get("password").map_err(column_error("password"))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            avatar_url: row.try_get("avatar_url").map_err(column_error("avatar_url"))?,
            auth_provider: row
                .try_get("auth_provider")
                .map_err(column_error("auth_provider"))?,
            is_admin: row.try_get("is_admin").map_err(column_error("is_admin"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }

    /// Lock and load a user row inside `tx`
    async fn lock_user(
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? FOR UPDATE", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_error("lock user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn begin(&self) -> Result<Transaction<'_, MySql>, DomainError> {
        self.pool.begin().await.map_err(db_error("begin transaction"))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user by id"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user by email"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding_user_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        let row = match excluding_user_id {
            Some(user_id) => {
                sqlx::query("SELECT COUNT(*) AS taken FROM users WHERE email = ? AND id <> ?")
                    .bind(email)
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS taken FROM users WHERE email = ?")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(db_error("check email ownership"))?;

        let taken: i64 = row.try_get("taken").map_err(column_error("taken"))?;
        Ok(taken > 0)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Option<User>, DomainError> {
        let mut tx = self.begin().await?;
        let Some(mut user) = Self::lock_user(&mut tx, id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        sqlx::query("UPDATE users SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("update name"))?;
        tx.commit().await.map_err(db_error("commit name update"))?;

        user.name = name.to_string();
        user.updated_at = now;
        Ok(Some(user))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, DomainError> {
        let mut tx = self.begin().await?;
        if Self::lock_user(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET password = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("update password"))?;
        tx.commit().await.map_err(db_error("commit password update"))?;

        Ok(true)
    }

    async fn update_avatar(&self, id: i64, avatar_url: Option<&str>) -> Result<bool, DomainError> {
        let mut tx = self.begin().await?;
        if Self::lock_user(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET avatar_url = ?, updated_at = ? WHERE id = ?")
            .bind(avatar_url)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("update avatar"))?;
        tx.commit().await.map_err(db_error("commit avatar update"))?;

        Ok(true)
    }

    async fn commit_email_change(
        &self,
        user_id: i64,
        new_email: &str,
        code: &str,
    ) -> Result<EmailChangeCommit, DomainError> {
        let mut tx = self.begin().await?;

        let owner = sqlx::query("SELECT id FROM users WHERE email = ? AND id <> ? FOR UPDATE")
            .bind(new_email)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("re-check email ownership"))?;
        if owner.is_some() {
            return Ok(EmailChangeCommit::EmailTaken);
        }

        let Some(mut user) = Self::lock_user(&mut tx, user_id).await? else {
            return Ok(EmailChangeCommit::UserNotFound);
        };

        let now = Utc::now();
        let updated = sqlx::query("UPDATE users SET email = ?, updated_at = ? WHERE id = ?")
            .bind(new_email)
            .bind(now)
            .bind(user_id)
            .execute(&mut *tx)
            .await;
        match updated {
            Ok(_) => {}
            // Lost a race against another account claiming the address
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Ok(EmailChangeCommit::EmailTaken);
            }
            Err(e) => return Err(db_error("update email")(e)),
        }

        sqlx::query("DELETE FROM email_verification_codes WHERE email = ? AND code = ?")
            .bind(new_email)
            .bind(code)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete consumed code"))?;

        tx.commit().await.map_err(db_error("commit email change"))?;

        user.email = new_email.to_string();
        user.updated_at = now;
        Ok(EmailChangeCommit::Committed(user))
    }

    async fn delete_with_codes(&self, id: i64) -> Result<Option<User>, DomainError> {
        let mut tx = self.begin().await?;
        let Some(user) = Self::lock_user(&mut tx, id).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM email_verification_codes WHERE email = ?")
            .bind(&user.email)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete user codes"))?;

        // bought_user_products rows go through ON DELETE CASCADE
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete user"))?;

        tx.commit().await.map_err(db_error("commit account deletion"))?;

        Ok(Some(user))
    }
}
