use directory::database::Result;
use model::{
    analytics::AnalyticsData,
    faculty::{ROLE_CC, ROLE_HOD},
};
use sqlx::{Executor, FromRow, Postgres};

use super::convert_error;

#[derive(Debug, FromRow)]
struct AnalyticsRow {
    total_faculty: i64,
    total_locations: i64,
    available_faculty: i64,
    available_hods: i64,
    available_ccs: i64,
}

pub async fn get<'c, E>(executor: E) -> Result<AnalyticsData>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: AnalyticsRow = sqlx::query_as(
        "
        SELECT
            (SELECT COUNT(*) FROM faculty) AS total_faculty,
            (SELECT COUNT(*) FROM locations) AS total_locations,
            (SELECT COUNT(*) FROM faculty WHERE availability) AS available_faculty,
            (SELECT COUNT(*) FROM faculty WHERE availability AND role = $1)
                AS available_hods,
            (SELECT COUNT(*) FROM faculty WHERE availability AND role = $2)
                AS available_ccs;
        ",
    )
    .bind(ROLE_HOD)
    .bind(ROLE_CC)
    .fetch_one(executor)
    .await
    .map_err(convert_error)?;

    Ok(AnalyticsData {
        total_faculty: row.total_faculty,
        total_locations: row.total_locations,
        available_faculty: row.available_faculty,
        unavailable_faculty: row.total_faculty - row.available_faculty,
        available_hods: row.available_hods,
        available_ccs: row.available_ccs,
    })
}
