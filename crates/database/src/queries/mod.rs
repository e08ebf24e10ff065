use directory::database::DatabaseError;

pub mod account;
pub mod analytics;
pub mod faculty;
pub mod flash_news;
pub mod location;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        sqlx::Error::Database(ref error) if error.is_unique_violation() => {
            DatabaseError::AlreadyExists
        }
        sqlx::Error::Database(ref error) if error.is_foreign_key_violation() => {
            DatabaseError::ForeignKeyViolation
        }
        _ => DatabaseError::Other(Box::new(why)),
    }
}

/// Maps a statement that affected no rows to `NotFound`.
pub(crate) fn expect_affected(rows_affected: u64) -> directory::database::Result<()> {
    if rows_affected == 0 {
        Err(DatabaseError::NotFound)
    } else {
        Ok(())
    }
}
