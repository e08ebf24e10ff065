use std::{error, fmt, fmt::Debug, result};

use async_trait::async_trait;
use model::{
    account::FacultyAccount, analytics::AnalyticsData, faculty::Faculty,
    flash_news::FlashNews, location::Location, WithId,
};
use serde::Serialize;
use utility::id::{HasId, Id};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    AlreadyExists,
    ForeignKeyViolation,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::AlreadyExists => f.write_str("record already exists"),
            Self::ForeignKeyViolation => f.write_str("foreign key violation"),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Operations shared by every table keyed by a record id.
#[async_trait]
pub trait Repo<T: Serialize + HasId>
where
    <T as HasId>::IdType: Debug + Clone + Serialize + PartialEq + schemars::JsonSchema,
{
    async fn get(&mut self, id: &Id<T>) -> Result<WithId<T>>;
    /// All records in the order they are listed to clients.
    async fn get_all(&mut self) -> Result<Vec<WithId<T>>>;
    async fn exists(&mut self, id: &Id<T>) -> Result<bool>;
    async fn delete(&mut self, id: &Id<T>) -> Result<()>;
}

#[async_trait]
pub trait LocationRepo: Repo<Location> {
    /// Fails with `AlreadyExists` if the id is taken.
    async fn insert_location(
        &mut self,
        location: WithId<Location>,
    ) -> Result<WithId<Location>>;

    async fn update_location(
        &mut self,
        location: WithId<Location>,
    ) -> Result<WithId<Location>>;
}

#[async_trait]
pub trait FacultyRepo: Repo<Faculty> {
    /// Stores a new member and assigns the next free id.
    async fn insert_faculty(&mut self, faculty: Faculty) -> Result<WithId<Faculty>>;

    async fn update_faculty(
        &mut self,
        faculty: WithId<Faculty>,
    ) -> Result<WithId<Faculty>>;

    async fn set_availability(
        &mut self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> Result<WithId<Faculty>>;

    /// Number of faculty members whose cabin is at the given location.
    async fn count_at_location(&mut self, location: &Id<Location>) -> Result<i64>;
}

#[async_trait]
pub trait FlashNewsRepo: Repo<FlashNews> {
    async fn insert_news(&mut self, news: FlashNews) -> Result<WithId<FlashNews>>;
}

#[async_trait]
pub trait AccountRepo {
    async fn faculty_by_username(&mut self, username: &str) -> Result<Option<Id<Faculty>>>;

    async fn put_account(&mut self, account: FacultyAccount) -> Result<FacultyAccount>;
}

#[async_trait]
pub trait AnalyticsRepo {
    async fn analytics(&mut self) -> Result<AnalyticsData>;
}

pub trait DatabaseOperations:
    LocationRepo + FacultyRepo + FlashNewsRepo + AccountRepo + AnalyticsRepo
{
}

impl<T> DatabaseOperations for T where
    T: LocationRepo + FacultyRepo + FlashNewsRepo + AccountRepo + AnalyticsRepo
{
}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// Storage backend of the campus directory.
/// Multiple concurrent accesses are possible by cloning the database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
