//! In-process [`DirectoryApi`] backed by the seeded memory directory, so the
//! client state machines can be tested without a server.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use directory::{client::Client, memory::MemoryDatabase, RequestError, RequestResult};
use model::{
    account::{FacultyLogin, LoginResponse},
    analytics::AnalyticsData,
    faculty::{Faculty, FacultyProfileUpdate, NewFaculty},
    flash_news::FlashNews,
    location::{Location, LocationUpdate},
    DeleteResponse, WithId,
};
use reqwest::StatusCode;
use utility::id::Id;

use super::{ApiError, ApiResult, DirectoryApi};

pub(crate) struct FakeApi {
    client: Client<MemoryDatabase>,
    failure: Mutex<Option<ApiError>>,
    requests: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn seeded() -> Self {
        Self {
            client: Client::new(MemoryDatabase::seeded()),
            failure: Mutex::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    /// The next request fails with `error` instead of reaching the directory.
    pub(crate) fn fail_next(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn fail_next_with(&self, status_code: StatusCode, detail: &str) {
        self.fail_next(ApiError::InvalidResponse {
            status_code,
            url: "fake".to_owned(),
            detail: Some(detail.to_owned()),
        });
    }

    /// Number of requests issued so far, failed ones included.
    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn call<T, F>(&self, path: &str, response: F) -> ApiResult<T>
    where
        F: std::future::Future<Output = RequestResult<T>>,
    {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let failure = self.failure.lock().unwrap().take();
        if let Some(error) = failure {
            return Err(error);
        }
        response.await.map_err(|why| {
            let (status_code, detail) = match why {
                RequestError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
                RequestError::Invalid(detail) => (StatusCode::BAD_REQUEST, detail),
                RequestError::Other(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                ),
            };
            ApiError::InvalidResponse {
                status_code,
                url: path.to_owned(),
                detail: Some(detail),
            }
        })
    }
}

#[async_trait]
impl DirectoryApi for FakeApi {
    async fn locations(&self) -> ApiResult<Vec<WithId<Location>>> {
        self.call("/locations", self.client.get_locations()).await
    }

    async fn create_location(&self, location: &WithId<Location>) -> ApiResult<WithId<Location>> {
        self.call("/locations", self.client.create_location(location.clone()))
            .await
    }

    async fn update_location(
        &self,
        id: &Id<Location>,
        update: &LocationUpdate,
    ) -> ApiResult<WithId<Location>> {
        self.call("/locations/:id", self.client.update_location(id, update.clone()))
            .await
    }

    async fn delete_location(&self, id: &Id<Location>) -> ApiResult<DeleteResponse> {
        self.call("/locations/:id", self.client.delete_location(id))
            .await
    }

    async fn faculty_list(&self) -> ApiResult<Vec<WithId<Faculty>>> {
        self.call("/faculty", self.client.get_faculty_list()).await
    }

    async fn faculty(&self, id: &Id<Faculty>) -> ApiResult<WithId<Faculty>> {
        self.call("/faculty/:id", self.client.get_faculty(id)).await
    }

    async fn create_faculty(&self, faculty: &NewFaculty) -> ApiResult<WithId<Faculty>> {
        self.call("/faculty", self.client.create_faculty(faculty.clone()))
            .await
    }

    async fn update_faculty(
        &self,
        id: &Id<Faculty>,
        update: &FacultyProfileUpdate,
    ) -> ApiResult<WithId<Faculty>> {
        self.call("/faculty/:id", self.client.update_faculty(id, update.clone()))
            .await
    }

    async fn set_availability(
        &self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> ApiResult<WithId<Faculty>> {
        self.call(
            "/faculty/:id/availability",
            self.client.set_availability(id, availability),
        )
        .await
    }

    async fn delete_faculty(&self, id: &Id<Faculty>) -> ApiResult<DeleteResponse> {
        self.call("/faculty/:id", self.client.delete_faculty(id)).await
    }

    async fn login(&self, username: &str) -> ApiResult<LoginResponse> {
        let login = FacultyLogin {
            username: username.to_owned(),
        };
        self.call("/faculty/login", self.client.faculty_login(login))
            .await
    }

    async fn flash_news(&self) -> ApiResult<Vec<WithId<FlashNews>>> {
        self.call("/flash-news", self.client.get_flash_news()).await
    }

    async fn create_flash_news(&self, message: &str) -> ApiResult<WithId<FlashNews>> {
        let news = FlashNews {
            message: message.to_owned(),
        };
        self.call("/flash-news", self.client.create_flash_news(news))
            .await
    }

    async fn delete_flash_news(&self, id: &Id<FlashNews>) -> ApiResult<DeleteResponse> {
        self.call("/flash-news/:id", self.client.delete_flash_news(id))
            .await
    }

    async fn analytics(&self) -> ApiResult<AnalyticsData> {
        self.call("/analytics", self.client.get_analytics()).await
    }
}
