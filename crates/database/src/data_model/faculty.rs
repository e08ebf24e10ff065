use async_trait::async_trait;
use directory::database::{FacultyRepo, Repo, Result};
use model::{faculty::Faculty, location::Location, WithId};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::faculty::{
    count_at_location, delete, exists, get, get_all, insert, set_availability, update,
};
use crate::PgDatabaseAutocommit;
use crate::PgDatabaseTransaction;

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct FacultyRow {
    pub id: i32,
    pub name: String,
    pub department: Option<String>,
    pub school: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    pub courses_taken: Vec<String>,
    pub cabin_number: Option<String>,
    pub phone_number: Option<String>,
    pub availability: bool,
    pub location_id: Option<String>,
}

impl DatabaseRow for FacultyRow {
    type Model = Faculty;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        Faculty {
            name: self.name,
            department: self.department,
            school: self.school,
            designation: self.designation,
            role: self.role,
            courses: self.courses_taken,
            cabin_number: self.cabin_number,
            phone_number: self.phone_number,
            availability: self.availability,
            location_id: self.location_id.map(Id::new),
        }
    }

    fn from_model(faculty: WithId<Faculty>) -> Self {
        Self {
            id: faculty.id.raw(),
            name: faculty.content.name,
            department: faculty.content.department,
            school: faculty.content.school,
            designation: faculty.content.designation,
            role: faculty.content.role,
            courses_taken: faculty.content.courses,
            cabin_number: faculty.content.cabin_number,
            phone_number: faculty.content.phone_number,
            availability: faculty.content.availability,
            location_id: faculty.content.location_id.map(Id::into_raw),
        }
    }
}

// Repo

#[async_trait]
impl Repo<Faculty> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Faculty>) -> Result<WithId<Faculty>> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Faculty>>> {
        get_all(&self.pool).await
    }

    async fn exists(&mut self, id: &Id<Faculty>) -> Result<bool> {
        exists(&self.pool, id).await
    }

    async fn delete(&mut self, id: &Id<Faculty>) -> Result<()> {
        delete(&self.pool, id).await
    }
}

#[async_trait]
impl<'a> Repo<Faculty> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &Id<Faculty>) -> Result<WithId<Faculty>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Faculty>>> {
        get_all(&mut *self.tx).await
    }

    async fn exists(&mut self, id: &Id<Faculty>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn delete(&mut self, id: &Id<Faculty>) -> Result<()> {
        delete(&mut *self.tx, id).await
    }
}

// Faculty Repo

#[async_trait]
impl FacultyRepo for PgDatabaseAutocommit {
    async fn insert_faculty(&mut self, faculty: Faculty) -> Result<WithId<Faculty>> {
        insert(&self.pool, faculty).await
    }

    async fn update_faculty(&mut self, faculty: WithId<Faculty>) -> Result<WithId<Faculty>> {
        update(&self.pool, faculty).await
    }

    async fn set_availability(
        &mut self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> Result<WithId<Faculty>> {
        set_availability(&self.pool, id, availability).await
    }

    async fn count_at_location(&mut self, location: &Id<Location>) -> Result<i64> {
        count_at_location(&self.pool, location).await
    }
}

#[async_trait]
impl<'a> FacultyRepo for PgDatabaseTransaction<'a> {
    async fn insert_faculty(&mut self, faculty: Faculty) -> Result<WithId<Faculty>> {
        insert(&mut *self.tx, faculty).await
    }

    async fn update_faculty(&mut self, faculty: WithId<Faculty>) -> Result<WithId<Faculty>> {
        update(&mut *self.tx, faculty).await
    }

    async fn set_availability(
        &mut self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> Result<WithId<Faculty>> {
        set_availability(&mut *self.tx, id, availability).await
    }

    async fn count_at_location(&mut self, location: &Id<Location>) -> Result<i64> {
        count_at_location(&mut *self.tx, location).await
    }
}
