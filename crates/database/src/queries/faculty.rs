use directory::database::Result;
use model::{faculty::Faculty, location::Location, WithId};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{faculty::FacultyRow, with_id, with_ids, DatabaseRow};

use super::{convert_error, expect_affected};

const COLUMNS: &str = "id, name, department, school, designation, role, courses_taken, \
    cabin_number, phone_number, availability, location_id";

pub async fn get<'c, E>(executor: E, id: &Id<Faculty>) -> Result<WithId<Faculty>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(&format!("SELECT {} FROM faculty WHERE id = $1;", COLUMNS))
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map(|row: FacultyRow| with_id(row))
        .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Faculty>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(&format!("SELECT {} FROM faculty ORDER BY name;", COLUMNS))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|faculty: Vec<FacultyRow>| Ok(with_ids(faculty)))
}

pub async fn exists<'c, E>(executor: E, id: &Id<Faculty>) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM faculty WHERE id = $1);")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, faculty: Faculty) -> Result<WithId<Faculty>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row = FacultyRow::from_model(WithId::new(Id::default(), faculty));
    sqlx::query_as(&format!(
        "
        INSERT INTO faculty(
            name,
            department,
            school,
            designation,
            role,
            courses_taken,
            cabin_number,
            phone_number,
            availability,
            location_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {};
        ",
        COLUMNS
    ))
    .bind(&row.name)
    .bind(&row.department)
    .bind(&row.school)
    .bind(&row.designation)
    .bind(&row.role)
    .bind(&row.courses_taken)
    .bind(&row.cabin_number)
    .bind(&row.phone_number)
    .bind(row.availability)
    .bind(&row.location_id)
    .fetch_one(executor)
    .await
    .map(|row: FacultyRow| with_id(row))
    .map_err(convert_error)
}

pub async fn update<'c, E>(executor: E, faculty: WithId<Faculty>) -> Result<WithId<Faculty>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row = FacultyRow::from_model(faculty);
    sqlx::query_as(&format!(
        "
        UPDATE faculty
        SET
            name = $2,
            department = $3,
            school = $4,
            designation = $5,
            role = $6,
            courses_taken = $7,
            cabin_number = $8,
            phone_number = $9,
            availability = $10,
            location_id = $11
        WHERE id = $1
        RETURNING {};
        ",
        COLUMNS
    ))
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.department)
    .bind(&row.school)
    .bind(&row.designation)
    .bind(&row.role)
    .bind(&row.courses_taken)
    .bind(&row.cabin_number)
    .bind(&row.phone_number)
    .bind(row.availability)
    .bind(&row.location_id)
    .fetch_one(executor)
    .await
    .map(|row: FacultyRow| with_id(row))
    .map_err(convert_error)
}

pub async fn set_availability<'c, E>(
    executor: E,
    id: &Id<Faculty>,
    availability: bool,
) -> Result<WithId<Faculty>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(&format!(
        "UPDATE faculty SET availability = $2 WHERE id = $1 RETURNING {};",
        COLUMNS
    ))
    .bind(id.raw())
    .bind(availability)
    .fetch_one(executor)
    .await
    .map(|row: FacultyRow| with_id(row))
    .map_err(convert_error)
}

pub async fn count_at_location<'c, E>(executor: E, location: &Id<Location>) -> Result<i64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM faculty WHERE location_id = $1;")
        .bind(location.raw_ref::<str>())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn delete<'c, E>(executor: E, id: &Id<Faculty>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("DELETE FROM faculty WHERE id = $1;")
        .bind(id.raw())
        .execute(executor)
        .await
        .map_err(convert_error)
        .and_then(|result| expect_affected(result.rows_affected()))
}
