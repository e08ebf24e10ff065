//! Database kept entirely in memory. Used when no Postgres instance is
//! configured and by the tests of the service layer.
//!
//! All tables live behind a single lock. A transaction holds the write lock
//! for its whole lifetime and works on a copy of the tables, which replaces
//! the shared state on commit. Dropping a transaction discards the copy.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use model::{
    account::FacultyAccount,
    analytics::AnalyticsData,
    faculty::Faculty,
    flash_news::FlashNews,
    location::Location,
    ExampleData, WithId,
};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use utility::id::Id;

use crate::database::{
    AccountRepo, AnalyticsRepo, Database, DatabaseAutocommit, DatabaseError,
    DatabaseTransaction, FacultyRepo, FlashNewsRepo, LocationRepo, Repo, Result,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    locations: BTreeMap<String, Location>,
    faculty: BTreeMap<i32, Faculty>,
    flash_news: BTreeMap<i32, FlashNews>,
    accounts: HashMap<String, Id<Faculty>>,
    last_faculty_id: i32,
    last_flash_news_id: i32,
}

impl Tables {
    fn locations(&self) -> Vec<WithId<Location>> {
        let mut locations = self
            .locations
            .iter()
            .map(|(id, location)| WithId::new(Id::new(id.clone()), location.clone()))
            .collect::<Vec<_>>();
        locations.sort_by(|a, b| a.content.label.cmp(&b.content.label));
        locations
    }

    fn location(&self, id: &Id<Location>) -> Result<WithId<Location>> {
        self.locations
            .get(id.raw_ref::<str>())
            .map(|location| WithId::new(id.clone(), location.clone()))
            .ok_or(DatabaseError::NotFound)
    }

    fn insert_location(&mut self, location: WithId<Location>) -> Result<WithId<Location>> {
        if self.locations.contains_key(location.id.raw_ref::<str>()) {
            return Err(DatabaseError::AlreadyExists);
        }
        self.locations
            .insert(location.id.raw(), location.content.clone());
        Ok(location)
    }

    fn update_location(&mut self, location: WithId<Location>) -> Result<WithId<Location>> {
        let stored = self
            .locations
            .get_mut(location.id.raw_ref::<str>())
            .ok_or(DatabaseError::NotFound)?;
        *stored = location.content.clone();
        Ok(location)
    }

    fn delete_location(&mut self, id: &Id<Location>) -> Result<()> {
        if self.count_at_location(id) > 0 {
            return Err(DatabaseError::ForeignKeyViolation);
        }
        self.locations
            .remove(id.raw_ref::<str>())
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }

    fn count_at_location(&self, id: &Id<Location>) -> i64 {
        self.faculty
            .values()
            .filter(|faculty| faculty.location_id.as_ref() == Some(id))
            .count() as i64
    }

    fn check_location_reference(&self, faculty: &Faculty) -> Result<()> {
        match &faculty.location_id {
            Some(id) if !self.locations.contains_key(id.raw_ref::<str>()) => {
                Err(DatabaseError::ForeignKeyViolation)
            }
            _ => Ok(()),
        }
    }

    fn faculty_list(&self) -> Vec<WithId<Faculty>> {
        let mut faculty = self
            .faculty
            .iter()
            .map(|(id, faculty)| WithId::new(Id::new(*id), faculty.clone()))
            .collect::<Vec<_>>();
        faculty.sort_by(|a, b| a.content.name.cmp(&b.content.name));
        faculty
    }

    fn faculty(&self, id: &Id<Faculty>) -> Result<WithId<Faculty>> {
        self.faculty
            .get(&id.raw())
            .map(|faculty| WithId::new(*id, faculty.clone()))
            .ok_or(DatabaseError::NotFound)
    }

    fn insert_faculty(&mut self, faculty: Faculty) -> Result<WithId<Faculty>> {
        self.check_location_reference(&faculty)?;
        self.last_faculty_id += 1;
        self.faculty.insert(self.last_faculty_id, faculty.clone());
        Ok(WithId::new(Id::new(self.last_faculty_id), faculty))
    }

    fn update_faculty(&mut self, faculty: WithId<Faculty>) -> Result<WithId<Faculty>> {
        self.check_location_reference(&faculty.content)?;
        let stored = self
            .faculty
            .get_mut(&faculty.id.raw())
            .ok_or(DatabaseError::NotFound)?;
        *stored = faculty.content.clone();
        Ok(faculty)
    }

    fn set_availability(
        &mut self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> Result<WithId<Faculty>> {
        let stored = self
            .faculty
            .get_mut(&id.raw())
            .ok_or(DatabaseError::NotFound)?;
        stored.availability = availability;
        Ok(WithId::new(*id, stored.clone()))
    }

    fn delete_faculty(&mut self, id: &Id<Faculty>) -> Result<()> {
        self.faculty
            .remove(&id.raw())
            .ok_or(DatabaseError::NotFound)?;
        self.accounts.retain(|_, faculty_id| faculty_id != id);
        Ok(())
    }

    fn flash_news_list(&self) -> Vec<WithId<FlashNews>> {
        self.flash_news
            .iter()
            .rev()
            .map(|(id, news)| WithId::new(Id::new(*id), news.clone()))
            .collect()
    }

    fn flash_news(&self, id: &Id<FlashNews>) -> Result<WithId<FlashNews>> {
        self.flash_news
            .get(&id.raw())
            .map(|news| WithId::new(*id, news.clone()))
            .ok_or(DatabaseError::NotFound)
    }

    fn insert_flash_news(&mut self, news: FlashNews) -> Result<WithId<FlashNews>> {
        self.last_flash_news_id += 1;
        self.flash_news.insert(self.last_flash_news_id, news.clone());
        Ok(WithId::new(Id::new(self.last_flash_news_id), news))
    }

    fn delete_flash_news(&mut self, id: &Id<FlashNews>) -> Result<()> {
        self.flash_news
            .remove(&id.raw())
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }

    fn put_account(&mut self, account: FacultyAccount) -> Result<FacultyAccount> {
        if !self.faculty.contains_key(&account.faculty_id.raw()) {
            return Err(DatabaseError::ForeignKeyViolation);
        }
        // one login per faculty member
        let taken = self.accounts.iter().any(|(username, faculty_id)| {
            *faculty_id == account.faculty_id && *username != account.username
        });
        if taken {
            return Err(DatabaseError::AlreadyExists);
        }
        self.accounts
            .insert(account.username.clone(), account.faculty_id);
        Ok(account)
    }

    fn analytics(&self) -> AnalyticsData {
        AnalyticsData::tally(self.faculty.values(), self.locations.len() as i64)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// A database filled with a small sample campus, so the API is usable
    /// without any setup.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for (id, subtitle) in [
            ("A-101", "Block A • Floor 1 • Classroom"),
            ("B-204", "Block B • Floor 2 • Computer Lab"),
            ("C-305", "Block C • Floor 3 • Faculty Cabins"),
            ("Main Auditorium", "Block A • Ground Floor"),
            ("Admission office", "Administrative Block • Ground Floor"),
            ("Confrence hall 2", "Block B • Floor 1"),
        ] {
            let location = WithId::new(Id::new(id.to_owned()), Location::new(id, Some(subtitle)));
            tables
                .insert_location(location)
                .expect("seed location ids are distinct");
        }
        let doe = WithId::<Faculty>::example_data().content;
        let doe = tables
            .insert_faculty(doe)
            .expect("seed faculty location exists");
        tables
            .put_account(FacultyAccount::new("jdoe", doe.id))
            .expect("seed account is unique");
        for message in [
            "Smart India Hackthon - Internal Round -> Main Auditorium",
            "Registrations for the Odd semester are now open. -> Admission office",
            "Guest lecture on \"The Future of AI\" this Wednesday -> Confrence hall 2",
        ] {
            tables
                .insert_flash_news(FlashNews {
                    message: message.to_owned(),
                })
                .expect("seed news is inserted");
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Transaction = MemoryTransaction;
    type Autocommit = MemoryAutocommit;

    async fn transaction(&self) -> Result<Self::Transaction> {
        let guard = self.tables.clone().write_owned().await;
        let working = guard.clone();
        Ok(MemoryTransaction { guard, working })
    }

    fn auto(&self) -> Self::Autocommit {
        MemoryAutocommit {
            tables: self.tables.clone(),
        }
    }
}

pub struct MemoryAutocommit {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryAutocommit {
    async fn tables(&mut self) -> OwnedRwLockWriteGuard<Tables> {
        self.tables.clone().write_owned().await
    }
}

pub struct MemoryTransaction {
    guard: OwnedRwLockWriteGuard<Tables>,
    working: Tables,
}

impl MemoryTransaction {
    async fn tables(&mut self) -> &mut Tables {
        &mut self.working
    }
}

#[async_trait]
impl DatabaseTransaction for MemoryTransaction {
    async fn commit(mut self) -> Result<()> {
        *self.guard = self.working;
        Ok(())
    }
}

impl DatabaseAutocommit for MemoryAutocommit {}

/// Implements every repo for a handle type with an inherent
/// `async fn tables(&mut self)` yielding mutable access to the tables.
macro_rules! memory_repos {
    ($handle:ty) => {
        #[async_trait]
        impl Repo<Location> for $handle {
            async fn get(&mut self, id: &Id<Location>) -> Result<WithId<Location>> {
                self.tables().await.location(id)
            }

            async fn get_all(&mut self) -> Result<Vec<WithId<Location>>> {
                Ok(self.tables().await.locations())
            }

            async fn exists(&mut self, id: &Id<Location>) -> Result<bool> {
                Ok(self.tables().await.location(id).is_ok())
            }

            async fn delete(&mut self, id: &Id<Location>) -> Result<()> {
                self.tables().await.delete_location(id)
            }
        }

        #[async_trait]
        impl LocationRepo for $handle {
            async fn insert_location(
                &mut self,
                location: WithId<Location>,
            ) -> Result<WithId<Location>> {
                self.tables().await.insert_location(location)
            }

            async fn update_location(
                &mut self,
                location: WithId<Location>,
            ) -> Result<WithId<Location>> {
                self.tables().await.update_location(location)
            }
        }

        #[async_trait]
        impl Repo<Faculty> for $handle {
            async fn get(&mut self, id: &Id<Faculty>) -> Result<WithId<Faculty>> {
                self.tables().await.faculty(id)
            }

            async fn get_all(&mut self) -> Result<Vec<WithId<Faculty>>> {
                Ok(self.tables().await.faculty_list())
            }

            async fn exists(&mut self, id: &Id<Faculty>) -> Result<bool> {
                Ok(self.tables().await.faculty(id).is_ok())
            }

            async fn delete(&mut self, id: &Id<Faculty>) -> Result<()> {
                self.tables().await.delete_faculty(id)
            }
        }

        #[async_trait]
        impl FacultyRepo for $handle {
            async fn insert_faculty(&mut self, faculty: Faculty) -> Result<WithId<Faculty>> {
                self.tables().await.insert_faculty(faculty)
            }

            async fn update_faculty(
                &mut self,
                faculty: WithId<Faculty>,
            ) -> Result<WithId<Faculty>> {
                self.tables().await.update_faculty(faculty)
            }

            async fn set_availability(
                &mut self,
                id: &Id<Faculty>,
                availability: bool,
            ) -> Result<WithId<Faculty>> {
                self.tables().await.set_availability(id, availability)
            }

            async fn count_at_location(&mut self, location: &Id<Location>) -> Result<i64> {
                Ok(self.tables().await.count_at_location(location))
            }
        }

        #[async_trait]
        impl Repo<FlashNews> for $handle {
            async fn get(&mut self, id: &Id<FlashNews>) -> Result<WithId<FlashNews>> {
                self.tables().await.flash_news(id)
            }

            async fn get_all(&mut self) -> Result<Vec<WithId<FlashNews>>> {
                Ok(self.tables().await.flash_news_list())
            }

            async fn exists(&mut self, id: &Id<FlashNews>) -> Result<bool> {
                Ok(self.tables().await.flash_news(id).is_ok())
            }

            async fn delete(&mut self, id: &Id<FlashNews>) -> Result<()> {
                self.tables().await.delete_flash_news(id)
            }
        }

        #[async_trait]
        impl FlashNewsRepo for $handle {
            async fn insert_news(&mut self, news: FlashNews) -> Result<WithId<FlashNews>> {
                self.tables().await.insert_flash_news(news)
            }
        }

        #[async_trait]
        impl AccountRepo for $handle {
            async fn faculty_by_username(
                &mut self,
                username: &str,
            ) -> Result<Option<Id<Faculty>>> {
                Ok(self.tables().await.accounts.get(username).copied())
            }

            async fn put_account(
                &mut self,
                account: FacultyAccount,
            ) -> Result<FacultyAccount> {
                self.tables().await.put_account(account)
            }
        }

        #[async_trait]
        impl AnalyticsRepo for $handle {
            async fn analytics(&mut self) -> Result<AnalyticsData> {
                Ok(self.tables().await.analytics())
            }
        }
    };
}

memory_repos!(MemoryAutocommit);
memory_repos!(MemoryTransaction);

#[cfg(test)]
mod tests {
    use model::{flash_news::FlashNews, location::Location};
    use pretty_assertions::assert_eq;
    use utility::id::Id;

    use super::MemoryDatabase;
    use crate::database::{
        AccountRepo, AnalyticsRepo, Database, DatabaseTransaction, FlashNewsRepo, Repo,
    };

    #[tokio::test]
    async fn dropped_transaction_changes_nothing() {
        let database = MemoryDatabase::default();
        {
            let mut tx = database.transaction().await.unwrap();
            tx.insert_news(FlashNews {
                message: "draft".to_owned(),
            })
            .await
            .unwrap();
        }
        let news = Repo::<FlashNews>::get_all(&mut database.auto()).await.unwrap();
        assert!(news.is_empty());

        let mut tx = database.transaction().await.unwrap();
        tx.insert_news(FlashNews {
            message: "published".to_owned(),
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();
        let news = Repo::<FlashNews>::get_all(&mut database.auto()).await.unwrap();
        assert_eq!(news.len(), 1);
    }

    #[tokio::test]
    async fn seeded_database_has_sample_campus() {
        let database = MemoryDatabase::seeded();
        let mut auto = database.auto();
        let location = auto.get(&Id::<Location>::new("C-305".to_owned())).await.unwrap();
        assert_eq!(location.content.label, "C-305");

        let news = Repo::<FlashNews>::get_all(&mut auto).await.unwrap();
        assert_eq!(news.len(), 3);
        assert!(news[0].content.message.starts_with("Guest lecture"));

        let doe = auto.faculty_by_username("jdoe").await.unwrap();
        assert!(doe.is_some());
        let analytics = auto.analytics().await.unwrap();
        assert_eq!(analytics.total_locations, 6);
        assert_eq!(analytics.available_hods, 1);
    }

    #[tokio::test]
    async fn location_with_faculty_is_protected() {
        let database = MemoryDatabase::seeded();
        let mut auto = database.auto();
        let result = auto.delete(&Id::<Location>::new("C-305".to_owned())).await;
        assert!(result.is_err());
        let kept = Repo::<Location>::get_all(&mut auto).await.unwrap();
        assert_eq!(kept.len(), 6);
    }
}
