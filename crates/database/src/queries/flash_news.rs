use directory::database::Result;
use model::{flash_news::FlashNews, WithId};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{flash_news::FlashNewsRow, with_id, with_ids};

use super::{convert_error, expect_affected};

pub async fn get<'c, E>(executor: E, id: &Id<FlashNews>) -> Result<WithId<FlashNews>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("SELECT id, message FROM flash_news WHERE id = $1;")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map(|row: FlashNewsRow| with_id(row))
        .map_err(convert_error)
}

/// Newest first.
pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<FlashNews>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("SELECT id, message FROM flash_news ORDER BY id DESC;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|news: Vec<FlashNewsRow>| Ok(with_ids(news)))
}

pub async fn exists<'c, E>(executor: E, id: &Id<FlashNews>) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM flash_news WHERE id = $1);")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, news: FlashNews) -> Result<WithId<FlashNews>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("INSERT INTO flash_news(message) VALUES ($1) RETURNING id, message;")
        .bind(&news.message)
        .fetch_one(executor)
        .await
        .map(|row: FlashNewsRow| with_id(row))
        .map_err(convert_error)
}

pub async fn delete<'c, E>(executor: E, id: &Id<FlashNews>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("DELETE FROM flash_news WHERE id = $1;")
        .bind(id.raw())
        .execute(executor)
        .await
        .map_err(convert_error)
        .and_then(|result| expect_affected(result.rows_affected()))
}
