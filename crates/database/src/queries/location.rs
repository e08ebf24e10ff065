use directory::database::Result;
use model::{location::Location, WithId};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{location::LocationRow, with_id, with_ids, DatabaseRow};

use super::{convert_error, expect_affected};

pub async fn get<'c, E>(executor: E, id: &Id<Location>) -> Result<WithId<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT id, label, subtitle, type
        FROM locations
        WHERE id = $1;
        ",
    )
    .bind(id.raw_ref::<str>())
    .fetch_one(executor)
    .await
    .map(|row: LocationRow| with_id(row))
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Location>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT id, label, subtitle, type
        FROM locations
        ORDER BY label;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|locations: Vec<LocationRow>| Ok(with_ids(locations)))
}

pub async fn exists<'c, E>(executor: E, id: &Id<Location>) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1);")
        .bind(id.raw_ref::<str>())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn insert<'c, E>(
    executor: E,
    location: WithId<Location>,
) -> Result<WithId<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row = LocationRow::from_model(location);
    sqlx::query_as(
        "
        INSERT INTO locations(id, label, subtitle, type)
        VALUES ($1, $2, $3, $4)
        RETURNING id, label, subtitle, type;
        ",
    )
    .bind(&row.id)
    .bind(&row.label)
    .bind(&row.subtitle)
    .bind(&row.kind)
    .fetch_one(executor)
    .await
    .map(|row: LocationRow| with_id(row))
    .map_err(convert_error)
}

pub async fn update<'c, E>(
    executor: E,
    location: WithId<Location>,
) -> Result<WithId<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row = LocationRow::from_model(location);
    sqlx::query_as(
        "
        UPDATE locations
        SET label = $2, subtitle = $3, type = $4
        WHERE id = $1
        RETURNING id, label, subtitle, type;
        ",
    )
    .bind(&row.id)
    .bind(&row.label)
    .bind(&row.subtitle)
    .bind(&row.kind)
    .fetch_one(executor)
    .await
    .map(|row: LocationRow| with_id(row))
    .map_err(convert_error)
}

pub async fn delete<'c, E>(executor: E, id: &Id<Location>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("DELETE FROM locations WHERE id = $1;")
        .bind(id.raw_ref::<str>())
        .execute(executor)
        .await
        .map_err(convert_error)
        .and_then(|result| expect_affected(result.rows_affected()))
}
