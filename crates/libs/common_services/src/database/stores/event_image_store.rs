use crate::database::DbError;
use crate::database::event::event_image::EventImage;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct EventImageStore;

impl EventImageStore {
    /// Appends image rows to an event.
    ///
    /// A url that is already part of the event is returned as-is instead of duplicated.
    pub async fn add_many(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
        urls: &[String],
        filenames: &[String],
    ) -> Result<Vec<EventImage>, DbError> {
        Ok(sqlx::query_as::<_, EventImage>(
            r"
            INSERT INTO event_image (event_id, url, filename)
            SELECT $1, item.url, item.filename
            FROM UNNEST($2::TEXT[], $3::TEXT[]) AS item(url, filename)
            ON CONFLICT (event_id, url) DO UPDATE SET url = EXCLUDED.url
            RETURNING id, event_id, url, filename, created_at
            ",
        )
        .bind(event_id)
        .bind(urls)
        .bind(filenames)
        .fetch_all(executor)
        .await?)
    }

    /// Removes the metadata row of a single image. Does not touch the file.
    pub async fn remove_by_url(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
        url: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM event_image WHERE event_id = $1 AND url = $2")
                .bind(event_id)
                .bind(url)
                .execute(executor)
                .await?,
        )
    }

    /// Images of one event, newest first.
    pub async fn list_for_event(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i32,
    ) -> Result<Vec<EventImage>, DbError> {
        Ok(sqlx::query_as::<_, EventImage>(
            r"
            SELECT id, event_id, url, filename, created_at
            FROM event_image
            WHERE event_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(event_id)
        .fetch_all(executor)
        .await?)
    }

    /// Images of several events at once, newest first within the whole set.
    pub async fn list_for_events(
        executor: impl Executor<'_, Database = Postgres>,
        event_ids: &[i32],
    ) -> Result<Vec<EventImage>, DbError> {
        Ok(sqlx::query_as::<_, EventImage>(
            r"
            SELECT id, event_id, url, filename, created_at
            FROM event_image
            WHERE event_id = ANY($1::INTEGER[])
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(event_ids)
        .fetch_all(executor)
        .await?)
    }

    /// Every stored url. Used by the orphan sweep.
    pub async fn list_urls(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>("SELECT url FROM event_image")
            .fetch_all(executor)
            .await?)
    }
}
