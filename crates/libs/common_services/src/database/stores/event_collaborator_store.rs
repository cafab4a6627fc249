use crate::database::DbError;
use crate::database::event::event_collaborator::{CollaboratorRow, EventCollaborator};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct EventCollaboratorStore;

impl EventCollaboratorStore {
    /// Inserts a collaborator link. `event_collaborator_event_id_user_id_key` rejects duplicates.
    pub async fn insert(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
        user_id: i32,
    ) -> Result<EventCollaborator, DbError> {
        Ok(sqlx::query_as::<_, EventCollaborator>(
            r"
            INSERT INTO event_collaborator (event_id, user_id)
            VALUES ($1, $2)
            RETURNING id, event_id, user_id, added_at
            ",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
        user_id: i32,
    ) -> Result<Option<EventCollaborator>, DbError> {
        Ok(sqlx::query_as::<_, EventCollaborator>(
            r"
            SELECT id, event_id, user_id, added_at
            FROM event_collaborator
            WHERE event_id = $1 AND user_id = $2
            ",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn remove(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
        user_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM event_collaborator WHERE event_id = $1 AND user_id = $2")
                .bind(event_id)
                .bind(user_id)
                .execute(executor)
                .await?,
        )
    }

    /// Collaborators of several events joined with their public user fields.
    pub async fn list_for_events(
        executor: impl Executor<'_, Database = Postgres>,
        event_ids: &[i32],
    ) -> Result<Vec<CollaboratorRow>, DbError> {
        Ok(sqlx::query_as::<_, CollaboratorRow>(
            r"
            SELECT
                c.id, c.event_id, c.user_id, c.added_at,
                u.email AS user_email,
                u.name AS user_name
            FROM event_collaborator c
            JOIN app_user u ON u.id = c.user_id
            WHERE c.event_id = ANY($1::INTEGER[])
            ORDER BY c.added_at, c.id
            ",
        )
        .bind(event_ids)
        .fetch_all(executor)
        .await?)
    }
}
