use directory::database::Result;
use model::{account::FacultyAccount, faculty::Faculty};
use sqlx::{Executor, Postgres};
use utility::id::Id;

use crate::data_model::account::FacultyUserRow;

use super::convert_error;

pub async fn faculty_by_username<'c, E>(
    executor: E,
    username: &str,
) -> Result<Option<Id<Faculty>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT faculty_id FROM faculty_users WHERE username = $1;")
        .bind(username)
        .fetch_optional(executor)
        .await
        .map(|faculty_id: Option<i32>| faculty_id.map(Id::new))
        .map_err(convert_error)
}

/// Inserts the account or moves an existing username to another member.
pub async fn put<'c, E>(executor: E, account: FacultyAccount) -> Result<FacultyAccount>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        INSERT INTO faculty_users(username, faculty_id)
        VALUES ($1, $2)
        ON CONFLICT (username)
        DO UPDATE SET faculty_id = EXCLUDED.faculty_id
        RETURNING username, faculty_id;
        ",
    )
    .bind(&account.username)
    .bind(account.faculty_id.raw())
    .fetch_one(executor)
    .await
    .map(|row: FacultyUserRow| row.into())
    .map_err(convert_error)
}
