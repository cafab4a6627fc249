use crate::database::DbError;
use crate::database::refresh_token::RefreshToken;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct RefreshTokenStore;

impl RefreshTokenStore {
    pub async fn insert(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        selector: &str,
        verifier_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            INSERT INTO refresh_token (user_id, selector, verifier_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id)
        .bind(selector)
        .bind(verifier_hash)
        .bind(expires_at)
        .execute(executor)
        .await?)
    }

    /// Finds a token by selector, ignoring expired ones.
    pub async fn find_valid(
        executor: impl Executor<'_, Database = Postgres>,
        selector: &str,
    ) -> Result<Option<RefreshToken>, DbError> {
        Ok(sqlx::query_as::<_, RefreshToken>(
            r"
            SELECT user_id, verifier_hash, expires_at
            FROM refresh_token
            WHERE selector = $1 AND expires_at > NOW()
            ",
        )
        .bind(selector)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find(
        executor: impl Executor<'_, Database = Postgres>,
        selector: &str,
    ) -> Result<Option<RefreshToken>, DbError> {
        Ok(sqlx::query_as::<_, RefreshToken>(
            r"
            SELECT user_id, verifier_hash, expires_at
            FROM refresh_token
            WHERE selector = $1
            ",
        )
        .bind(selector)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete_by_selector(
        executor: impl Executor<'_, Database = Postgres>,
        selector: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
            .bind(selector)
            .execute(executor)
            .await?)
    }

    pub async fn delete_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM refresh_token WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?)
    }
}
