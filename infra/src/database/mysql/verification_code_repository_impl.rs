//! MySQL implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use mz_core::domain::entities::verification_code::{VerificationCode, VerificationPurpose};
use mz_core::errors::DomainError;
use mz_core::repositories::VerificationCodeRepository;

use super::{column_error, db_error};

/// MySQL implementation of VerificationCodeRepository
///
/// Rows live in `email_verification_codes`; the purpose is stored in the
/// `verification_type` column.
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn replace_active(
        &self,
        mut code: VerificationCode,
    ) -> Result<VerificationCode, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            "UPDATE email_verification_codes SET is_used = TRUE WHERE email = ? AND is_used = FALSE",
        )
        .bind(&code.email)
        .execute(&mut *tx)
        .await
        .map_err(db_error("invalidate previous codes"))?;

        let result = sqlx::query(
            r#"
            INSERT INTO email_verification_codes (
                email, code, verification_type, created_at, expires_at, is_used
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.purpose.as_str())
        .bind(code.created_at)
        .bind(code.expires_at)
        .bind(code.is_used)
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert verification code"))?;

        tx.commit().await.map_err(db_error("commit verification code"))?;

        code.id = result.last_insert_id() as i64;
        Ok(code)
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        purpose: Option<VerificationPurpose>,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let purpose = purpose.map(|p| p.as_str());
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let row = sqlx::query(
            r#"
            SELECT id FROM email_verification_codes
            WHERE email = ? AND code = ? AND is_used = FALSE AND expires_at > ?
              AND (? IS NULL OR verification_type = ?)
            ORDER BY created_at DESC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(now)
        .bind(purpose)
        .bind(purpose)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("find verification code"))?;

        let Some(row) = row else {
            return Ok(false);
        };
        let id: i64 = row.try_get("id").map_err(column_error("id"))?;

        sqlx::query("UPDATE email_verification_codes SET is_used = TRUE WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("mark code used"))?;

        tx.commit().await.map_err(db_error("commit code consumption"))?;
        Ok(true)
    }

    async fn has_active(&self, email: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS active FROM email_verification_codes
            WHERE email = ? AND is_used = FALSE AND expires_at > ?
            "#,
        )
        .bind(email)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("check pending verification"))?;

        let active: i64 = row.try_get("active").map_err(column_error("active"))?;
        Ok(active > 0)
    }

    async fn delete(&self, email: &str, code: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM email_verification_codes WHERE email = ? AND code = ?")
            .bind(email)
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete verification code"))?;

        Ok(result.rows_affected())
    }
}
