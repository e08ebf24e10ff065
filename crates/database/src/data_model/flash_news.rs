use async_trait::async_trait;
use directory::database::{FlashNewsRepo, Repo, Result};
use model::{flash_news::FlashNews, WithId};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::flash_news::{delete, exists, get, get_all, insert};
use crate::PgDatabaseAutocommit;
use crate::PgDatabaseTransaction;

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct FlashNewsRow {
    pub id: i32,
    pub message: String,
}

impl DatabaseRow for FlashNewsRow {
    type Model = FlashNews;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        FlashNews {
            message: self.message,
        }
    }

    fn from_model(news: WithId<FlashNews>) -> Self {
        Self {
            id: news.id.raw(),
            message: news.content.message,
        }
    }
}

#[async_trait]
impl Repo<FlashNews> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &Id<FlashNews>) -> Result<WithId<FlashNews>> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<FlashNews>>> {
        get_all(&self.pool).await
    }

    async fn exists(&mut self, id: &Id<FlashNews>) -> Result<bool> {
        exists(&self.pool, id).await
    }

    async fn delete(&mut self, id: &Id<FlashNews>) -> Result<()> {
        delete(&self.pool, id).await
    }
}

#[async_trait]
impl<'a> Repo<FlashNews> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &Id<FlashNews>) -> Result<WithId<FlashNews>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<FlashNews>>> {
        get_all(&mut *self.tx).await
    }

    async fn exists(&mut self, id: &Id<FlashNews>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn delete(&mut self, id: &Id<FlashNews>) -> Result<()> {
        delete(&mut *self.tx, id).await
    }
}

#[async_trait]
impl FlashNewsRepo for PgDatabaseAutocommit {
    async fn insert_news(&mut self, news: FlashNews) -> Result<WithId<FlashNews>> {
        insert(&self.pool, news).await
    }
}

#[async_trait]
impl<'a> FlashNewsRepo for PgDatabaseTransaction<'a> {
    async fn insert_news(&mut self, news: FlashNews) -> Result<WithId<FlashNews>> {
        insert(&mut *self.tx, news).await
    }
}
