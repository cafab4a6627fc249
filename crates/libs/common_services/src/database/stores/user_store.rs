use crate::database::DbError;
use crate::database::app_user::{User, UserWithPassword};
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    //================================================================================
    // Core User Management
    //================================================================================

    /// Creates a new user. The `app_user_email_key` constraint rejects duplicate emails.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (email, name, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, created_at
            ",
        )
        .bind(email)
        .bind(name)
        .bind(hashed_password)
        .fetch_one(executor)
        .await?)
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, email, name, created_at
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_email(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, email, name, created_at
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            r"
            SELECT id, email, name, created_at, password
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn list_users(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, email, name, created_at
            FROM app_user
            ORDER BY id
            ",
        )
        .fetch_all(executor)
        .await?)
    }
}
