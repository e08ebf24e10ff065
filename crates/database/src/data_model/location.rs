use async_trait::async_trait;
use directory::database::{LocationRepo, Repo, Result};
use model::{location::Location, WithId};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::location::{delete, exists, get, get_all, insert, update};
use crate::PgDatabaseAutocommit;
use crate::PgDatabaseTransaction;

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: String,
    pub label: String,
    pub subtitle: Option<String>,
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl DatabaseRow for LocationRow {
    type Model = Location;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        Location {
            label: self.label,
            subtitle: self.subtitle,
            kind: self.kind,
        }
    }

    fn from_model(location: WithId<Location>) -> Self {
        Self {
            id: location.id.into_raw(),
            label: location.content.label,
            subtitle: location.content.subtitle,
            kind: location.content.kind,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Location> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Location>) -> Result<WithId<Location>> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Location>>> {
        get_all(&self.pool).await
    }

    async fn exists(&mut self, id: &Id<Location>) -> Result<bool> {
        exists(&self.pool, id).await
    }

    async fn delete(&mut self, id: &Id<Location>) -> Result<()> {
        delete(&self.pool, id).await
    }
}

#[async_trait]
impl<'a> Repo<Location> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &Id<Location>) -> Result<WithId<Location>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Location>>> {
        get_all(&mut *self.tx).await
    }

    async fn exists(&mut self, id: &Id<Location>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn delete(&mut self, id: &Id<Location>) -> Result<()> {
        delete(&mut *self.tx, id).await
    }
}

// Location Repo

#[async_trait]
impl LocationRepo for PgDatabaseAutocommit {
    async fn insert_location(
        &mut self,
        location: WithId<Location>,
    ) -> Result<WithId<Location>> {
        insert(&self.pool, location).await
    }

    async fn update_location(
        &mut self,
        location: WithId<Location>,
    ) -> Result<WithId<Location>> {
        update(&self.pool, location).await
    }
}

#[async_trait]
impl<'a> LocationRepo for PgDatabaseTransaction<'a> {
    async fn insert_location(
        &mut self,
        location: WithId<Location>,
    ) -> Result<WithId<Location>> {
        insert(&mut *self.tx, location).await
    }

    async fn update_location(
        &mut self,
        location: WithId<Location>,
    ) -> Result<WithId<Location>> {
        update(&mut *self.tx, location).await
    }
}
