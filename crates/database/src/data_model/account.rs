use async_trait::async_trait;
use directory::database::{AccountRepo, Result};
use model::{account::FacultyAccount, faculty::Faculty};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::account::{faculty_by_username, put};
use crate::PgDatabaseAutocommit;
use crate::PgDatabaseTransaction;

#[derive(Debug, Clone, FromRow)]
pub struct FacultyUserRow {
    pub username: String,
    pub faculty_id: i32,
}

impl From<FacultyUserRow> for FacultyAccount {
    fn from(row: FacultyUserRow) -> Self {
        FacultyAccount {
            username: row.username,
            faculty_id: Id::new(row.faculty_id),
        }
    }
}

#[async_trait]
impl AccountRepo for PgDatabaseAutocommit {
    async fn faculty_by_username(&mut self, username: &str) -> Result<Option<Id<Faculty>>> {
        faculty_by_username(&self.pool, username).await
    }

    async fn put_account(&mut self, account: FacultyAccount) -> Result<FacultyAccount> {
        put(&self.pool, account).await
    }
}

#[async_trait]
impl<'a> AccountRepo for PgDatabaseTransaction<'a> {
    async fn faculty_by_username(&mut self, username: &str) -> Result<Option<Id<Faculty>>> {
        faculty_by_username(&mut *self.tx, username).await
    }

    async fn put_account(&mut self, account: FacultyAccount) -> Result<FacultyAccount> {
        put(&mut *self.tx, account).await
    }
}
