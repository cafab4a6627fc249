use crate::database::DbError;
use crate::database::event::event::{Event, EventAccess, EventWithOwnerRow};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct EventStore;

impl EventStore {
    //================================================================================
    // Core Event Management
    //================================================================================

    /// Inserts a new public event. The `event_slug_key` constraint rejects duplicate slugs.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        name: &str,
        slug: &str,
        owner_id: i32,
    ) -> Result<Event, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            r"
            INSERT INTO event (name, slug, owner_id, is_public)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, name, slug, owner_id, is_public, created_at
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(owner_id)
        .fetch_one(executor)
        .await?)
    }

    /// Deletes an event. Images and collaborator rows go with it through `ON DELETE CASCADE`.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM event WHERE id = $1")
            .bind(event_id)
            .execute(executor)
            .await?)
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn slug_exists(
        executor: impl Executor<'_, Database = Postgres>,
        slug: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM event WHERE slug = $1)")
                .bind(slug)
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn find_by_slug(
        executor: impl Executor<'_, Database = Postgres>,
        slug: &str,
    ) -> Result<Option<Event>, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            r"
            SELECT id, name, slug, owner_id, is_public, created_at
            FROM event
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_with_owner(
        executor: impl Executor<'_, Database = Postgres>,
        slug: &str,
    ) -> Result<Option<EventWithOwnerRow>, DbError> {
        Ok(sqlx::query_as::<_, EventWithOwnerRow>(
            r"
            SELECT
                e.id, e.name, e.slug, e.owner_id, e.is_public, e.created_at,
                u.email AS owner_email,
                u.name AS owner_name
            FROM event e
            JOIN app_user u ON u.id = e.owner_id
            WHERE e.slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(executor)
        .await?)
    }

    /// Owner and collaborator ids of an event, the input for the access policy.
    pub async fn find_access(
        executor: impl Executor<'_, Database = Postgres>,
        slug: &str,
    ) -> Result<Option<EventAccess>, DbError> {
        Ok(sqlx::query_as::<_, EventAccess>(
            r"
            SELECT
                e.id AS event_id,
                e.owner_id,
                COALESCE(
                    array_agg(c.user_id) FILTER (WHERE c.user_id IS NOT NULL),
                    '{}'
                )::INTEGER[] AS collaborator_ids
            FROM event e
            LEFT JOIN event_collaborator c ON c.event_id = e.id
            WHERE e.slug = $1
            GROUP BY e.id
            ",
        )
        .bind(slug)
        .fetch_optional(executor)
        .await?)
    }

    /// Every event the user owns or collaborates on, newest first.
    pub async fn list_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Vec<EventWithOwnerRow>, DbError> {
        Ok(sqlx::query_as::<_, EventWithOwnerRow>(
            r"
            SELECT
                e.id, e.name, e.slug, e.owner_id, e.is_public, e.created_at,
                u.email AS owner_email,
                u.name AS owner_name
            FROM event e
            JOIN app_user u ON u.id = e.owner_id
            WHERE e.owner_id = $1
               OR EXISTS (
                    SELECT 1 FROM event_collaborator c
                    WHERE c.event_id = e.id AND c.user_id = $1
               )
            ORDER BY e.created_at DESC, e.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Utilities
    //================================================================================

    pub async fn list_slugs(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>("SELECT slug FROM event")
            .fetch_all(executor)
            .await?)
    }
}
