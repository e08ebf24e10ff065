use model::{
    account::{normalize_username, FacultyAccount, FacultyLogin, LoginResponse},
    analytics::AnalyticsData,
    faculty::{Faculty, FacultyProfileUpdate, NewFaculty},
    flash_news::FlashNews,
    location::{Location, LocationUpdate},
    DeleteResponse, WithId,
};
use utility::{id::Id, let_also::LetAlso, text::non_blank};

use crate::{
    database::{
        AccountRepo, AnalyticsRepo, Database, DatabaseTransaction, FacultyRepo,
        FlashNewsRepo, LocationRepo, Repo,
    },
    RequestError, RequestResult,
};

const LOCATION_NOT_FOUND: &str = "Location not found";
const FACULTY_NOT_FOUND: &str = "Faculty not found";
const FLASH_NEWS_NOT_FOUND: &str = "Flash news item not found";
const NO_UPDATE_DATA: &str = "No update data provided";

/// Entry point of the directory service. Every rule about what may be stored
/// lives here, the database only persists.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }
}

impl<D> Client<D>
where
    D: Database,
{
    pub async fn get_locations(&self) -> RequestResult<Vec<WithId<Location>>> {
        Ok(Repo::<Location>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn get_location(
        &self,
        id: &Id<Location>,
    ) -> RequestResult<WithId<Location>> {
        self.database
            .auto()
            .get(id)
            .await
            .map_err(|why| not_found_as(why, LOCATION_NOT_FOUND))
    }

    pub async fn create_location(
        &self,
        location: WithId<Location>,
    ) -> RequestResult<WithId<Location>> {
        if non_blank(location.id.raw_ref::<str>()).is_none() {
            return Err(RequestError::invalid("Location ID cannot be empty."));
        }
        let mut tx = self.database.transaction().await?;
        if tx.exists(&location.id).await? {
            return Err(RequestError::invalid(format!(
                "Location ID '{}' already exists.",
                location.id
            )));
        }
        let result = tx.insert_location(location).await?;
        tx.commit().await?;
        log::info!("Created location '{}'", result.id);
        Ok(result)
    }

    pub async fn update_location(
        &self,
        id: &Id<Location>,
        update: LocationUpdate,
    ) -> RequestResult<WithId<Location>> {
        if update.is_empty() {
            return Err(RequestError::invalid(NO_UPDATE_DATA));
        }
        let mut tx = self.database.transaction().await?;
        let location = tx
            .get(id)
            .await
            .map_err(|why| not_found_as(why, LOCATION_NOT_FOUND))?
            .map(|location| location.also(|location| update.apply(location)));
        let result = tx.update_location(location).await?;
        tx.commit().await?;
        log::info!("Updated location '{}'", result.id);
        Ok(result)
    }

    pub async fn delete_location(
        &self,
        id: &Id<Location>,
    ) -> RequestResult<DeleteResponse> {
        let mut tx = self.database.transaction().await?;
        if !tx.exists(id).await? {
            return Err(RequestError::not_found(LOCATION_NOT_FOUND));
        }
        if tx.count_at_location(id).await? > 0 {
            return Err(RequestError::invalid(
                "Cannot delete location: It is currently assigned to one or more faculty members.",
            ));
        }
        tx.delete(id).await?;
        tx.commit().await?;
        log::info!("Deleted location '{}'", id);
        Ok(DeleteResponse::deleted("Location deleted successfully"))
    }
}

impl<D> Client<D>
where
    D: Database,
{
    pub async fn get_faculty_list(&self) -> RequestResult<Vec<WithId<Faculty>>> {
        Ok(Repo::<Faculty>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn get_faculty(&self, id: &Id<Faculty>) -> RequestResult<WithId<Faculty>> {
        self.database
            .auto()
            .get(id)
            .await
            .map_err(|why| not_found_as(why, FACULTY_NOT_FOUND))
    }

    pub async fn create_faculty(
        &self,
        faculty: NewFaculty,
    ) -> RequestResult<WithId<Faculty>> {
        let mut tx = self.database.transaction().await?;
        if let Some(location_id) = &faculty.location_id {
            ensure_location_exists(&mut tx, location_id).await?;
        }
        let result = tx.insert_faculty(faculty.into()).await?;
        tx.commit().await?;
        log::info!("Created faculty member {} ({})", result.id, result.content.name);
        Ok(result)
    }

    pub async fn update_faculty(
        &self,
        id: &Id<Faculty>,
        update: FacultyProfileUpdate,
    ) -> RequestResult<WithId<Faculty>> {
        if update.is_empty() {
            return Err(RequestError::invalid(NO_UPDATE_DATA));
        }
        let mut tx = self.database.transaction().await?;
        let faculty = tx
            .get(id)
            .await
            .map_err(|why| not_found_as(why, FACULTY_NOT_FOUND))?;
        if let Some(location_id) = update.assigned_location() {
            ensure_location_exists(&mut tx, location_id).await?;
        }
        let faculty = faculty.map(|faculty| faculty.also(|faculty| update.apply(faculty)));
        let result = tx.update_faculty(faculty).await?;
        tx.commit().await?;
        log::info!("Updated faculty member {}", result.id);
        Ok(result)
    }

    pub async fn set_availability(
        &self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> RequestResult<WithId<Faculty>> {
        let result = self
            .database
            .auto()
            .set_availability(id, availability)
            .await
            .map_err(|why| not_found_as(why, FACULTY_NOT_FOUND))?;
        log::info!(
            "Faculty member {} is now {}",
            id,
            if availability { "available" } else { "unavailable" }
        );
        Ok(result)
    }

    pub async fn delete_faculty(&self, id: &Id<Faculty>) -> RequestResult<DeleteResponse> {
        let mut tx = self.database.transaction().await?;
        if !tx.exists(id).await? {
            return Err(RequestError::not_found(FACULTY_NOT_FOUND));
        }
        tx.delete(id).await?;
        tx.commit().await?;
        log::info!("Deleted faculty member {}", id);
        Ok(DeleteResponse::deleted("Faculty member deleted successfully"))
    }

    pub async fn faculty_login(&self, login: FacultyLogin) -> RequestResult<LoginResponse> {
        let username = normalize_username(&login.username);
        self.database
            .auto()
            .faculty_by_username(&username)
            .await?
            .map(LoginResponse::faculty)
            .unwrap_or_else(|| LoginResponse::rejected("Invalid faculty username"))
            .let_owned(Ok)
    }

    /// Links a login name to an existing faculty member.
    pub async fn register_account(
        &self,
        username: &str,
        faculty_id: Id<Faculty>,
    ) -> RequestResult<FacultyAccount> {
        let mut tx = self.database.transaction().await?;
        if !tx.exists(&faculty_id).await? {
            return Err(RequestError::not_found(FACULTY_NOT_FOUND));
        }
        let result = tx
            .put_account(FacultyAccount::new(username, faculty_id))
            .await?;
        tx.commit().await?;
        Ok(result)
    }
}

impl<D> Client<D>
where
    D: Database,
{
    pub async fn get_flash_news(&self) -> RequestResult<Vec<WithId<FlashNews>>> {
        Ok(Repo::<FlashNews>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn create_flash_news(
        &self,
        news: FlashNews,
    ) -> RequestResult<WithId<FlashNews>> {
        let message = non_blank(&news.message)
            .ok_or_else(|| RequestError::invalid("News message cannot be empty."))?
            .to_owned();
        let result = self
            .database
            .auto()
            .insert_news(FlashNews { message })
            .await?;
        log::info!("Published flash news {}", result.id);
        Ok(result)
    }

    pub async fn delete_flash_news(
        &self,
        id: &Id<FlashNews>,
    ) -> RequestResult<DeleteResponse> {
        let mut tx = self.database.transaction().await?;
        if !tx.exists(id).await? {
            return Err(RequestError::not_found(FLASH_NEWS_NOT_FOUND));
        }
        tx.delete(id).await?;
        tx.commit().await?;
        log::info!("Deleted flash news {}", id);
        Ok(DeleteResponse::deleted("Flash news item deleted successfully"))
    }

    pub async fn get_analytics(&self) -> RequestResult<AnalyticsData> {
        Ok(self.database.auto().analytics().await?)
    }
}

async fn ensure_location_exists<T>(tx: &mut T, id: &Id<Location>) -> RequestResult<()>
where
    T: DatabaseTransaction + Send,
{
    if tx.exists(id).await? {
        Ok(())
    } else {
        Err(RequestError::invalid(format!(
            "Location ID '{}' does not exist.",
            id
        )))
    }
}

fn not_found_as(why: crate::database::DatabaseError, message: &str) -> RequestError {
    match why {
        crate::database::DatabaseError::NotFound => RequestError::not_found(message),
        other => other.into(),
    }
}
