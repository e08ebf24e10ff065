use std::{error, fmt, sync::Arc};

use async_trait::async_trait;
use model::{
    account::{FacultyLogin, LoginResponse},
    analytics::AnalyticsData,
    faculty::{AvailabilityUpdate, Faculty, FacultyProfileUpdate, NewFaculty},
    flash_news::FlashNews,
    location::{Location, LocationUpdate},
    DeleteResponse, WithId,
};
use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utility::id::Id;

use crate::ApiConfig;

#[cfg(test)]
pub(crate) mod fake;

#[derive(Debug, Clone)]
pub enum ApiError {
    /// The request could not be sent or the response body was unreadable.
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    /// The backend answered with a non-success status.
    InvalidResponse {
        status_code: StatusCode,
        url: String,
        detail: Option<String>,
    },
    Other(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiError::InvalidResponse { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// The `detail` message sent by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::InvalidResponse { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Text for an inline banner: the backend's message, or `fallback` when
    /// the failure happened before the backend could explain itself.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                detail,
            } => match detail {
                Some(text) => write!(f, "Invalid Response ({}) {}: {}", status_code, text, url),
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::Other(e) => write!(f, "{e}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Every backend endpoint the client uses.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn locations(&self) -> ApiResult<Vec<WithId<Location>>>;
    async fn create_location(&self, location: &WithId<Location>) -> ApiResult<WithId<Location>>;
    async fn update_location(
        &self,
        id: &Id<Location>,
        update: &LocationUpdate,
    ) -> ApiResult<WithId<Location>>;
    async fn delete_location(&self, id: &Id<Location>) -> ApiResult<DeleteResponse>;

    async fn faculty_list(&self) -> ApiResult<Vec<WithId<Faculty>>>;
    async fn faculty(&self, id: &Id<Faculty>) -> ApiResult<WithId<Faculty>>;
    async fn create_faculty(&self, faculty: &NewFaculty) -> ApiResult<WithId<Faculty>>;
    async fn update_faculty(
        &self,
        id: &Id<Faculty>,
        update: &FacultyProfileUpdate,
    ) -> ApiResult<WithId<Faculty>>;
    async fn set_availability(
        &self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> ApiResult<WithId<Faculty>>;
    async fn delete_faculty(&self, id: &Id<Faculty>) -> ApiResult<DeleteResponse>;
    async fn login(&self, username: &str) -> ApiResult<LoginResponse>;

    async fn flash_news(&self) -> ApiResult<Vec<WithId<FlashNews>>>;
    async fn create_flash_news(&self, message: &str) -> ApiResult<WithId<FlashNews>>;
    async fn delete_flash_news(&self, id: &Id<FlashNews>) -> ApiResult<DeleteResponse>;

    async fn analytics(&self) -> ApiResult<AnalyticsData>;
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// [`DirectoryApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDirectoryApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|why| ApiError::Other(format!("Invalid API url '{}': {}", config.base_url, why)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Other(format!(
                "Invalid API url '{}'",
                config.base_url
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Appends path segments to the base url. Segments are percent encoded,
    /// so location ids like `Main Auditorium` are safe to pass.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        log::debug!("Requesting {} {}", method, url);

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status_code = response.status();
        if status_code.is_success() {
            return Ok(serde_json::from_str(&response.text().await?)?);
        }
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.detail);
        log::warn!("{} answered {}: {:?}", url, status_code, detail);
        Err(ApiError::InvalidResponse {
            status_code,
            url: url.to_string(),
            detail,
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        self.request::<(), T>(Method::GET, segments, None).await
    }

    async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        self.request::<(), T>(Method::DELETE, segments, None).await
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn locations(&self) -> ApiResult<Vec<WithId<Location>>> {
        self.get(&["locations"]).await
    }

    async fn create_location(&self, location: &WithId<Location>) -> ApiResult<WithId<Location>> {
        self.request(Method::POST, &["locations"], Some(location)).await
    }

    async fn update_location(
        &self,
        id: &Id<Location>,
        update: &LocationUpdate,
    ) -> ApiResult<WithId<Location>> {
        self.request(Method::PUT, &["locations", id.raw_ref::<str>()], Some(update))
            .await
    }

    async fn delete_location(&self, id: &Id<Location>) -> ApiResult<DeleteResponse> {
        self.delete(&["locations", id.raw_ref::<str>()]).await
    }

    async fn faculty_list(&self) -> ApiResult<Vec<WithId<Faculty>>> {
        self.get(&["faculty"]).await
    }

    async fn faculty(&self, id: &Id<Faculty>) -> ApiResult<WithId<Faculty>> {
        self.get(&["faculty", &id.to_string()]).await
    }

    async fn create_faculty(&self, faculty: &NewFaculty) -> ApiResult<WithId<Faculty>> {
        self.request(Method::POST, &["faculty"], Some(faculty)).await
    }

    async fn update_faculty(
        &self,
        id: &Id<Faculty>,
        update: &FacultyProfileUpdate,
    ) -> ApiResult<WithId<Faculty>> {
        self.request(Method::PUT, &["faculty", &id.to_string()], Some(update))
            .await
    }

    async fn set_availability(
        &self,
        id: &Id<Faculty>,
        availability: bool,
    ) -> ApiResult<WithId<Faculty>> {
        self.request(
            Method::PUT,
            &["faculty", &id.to_string(), "availability"],
            Some(&AvailabilityUpdate { availability }),
        )
        .await
    }

    async fn delete_faculty(&self, id: &Id<Faculty>) -> ApiResult<DeleteResponse> {
        self.delete(&["faculty", &id.to_string()]).await
    }

    async fn login(&self, username: &str) -> ApiResult<LoginResponse> {
        let login = FacultyLogin {
            username: username.to_owned(),
        };
        self.request(Method::POST, &["faculty", "login"], Some(&login))
            .await
    }

    async fn flash_news(&self) -> ApiResult<Vec<WithId<FlashNews>>> {
        self.get(&["flash-news"]).await
    }

    async fn create_flash_news(&self, message: &str) -> ApiResult<WithId<FlashNews>> {
        let news = FlashNews {
            message: message.to_owned(),
        };
        self.request(Method::POST, &["flash-news"], Some(&news)).await
    }

    async fn delete_flash_news(&self, id: &Id<FlashNews>) -> ApiResult<DeleteResponse> {
        self.delete(&["flash-news", &id.to_string()]).await
    }

    async fn analytics(&self) -> ApiResult<AnalyticsData> {
        self.get(&["analytics"]).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn endpoints_are_appended_and_encoded() {
        let api = HttpDirectoryApi::new(&ApiConfig::default()).unwrap();
        assert_eq!(
            api.endpoint(&["locations", "Main Auditorium"]).as_str(),
            "http://localhost:8000/api/locations/Main%20Auditorium"
        );

        let api = HttpDirectoryApi::new(&ApiConfig {
            base_url: "http://campus.example/api/".to_owned(),
        })
        .unwrap();
        assert_eq!(
            api.endpoint(&["faculty", "3", "availability"]).as_str(),
            "http://campus.example/api/faculty/3/availability"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        let config = ApiConfig {
            base_url: "mailto:admin@campus.example".to_owned(),
        };
        assert!(HttpDirectoryApi::new(&config).is_err());
        let config = ApiConfig {
            base_url: "not a url".to_owned(),
        };
        assert!(HttpDirectoryApi::new(&config).is_err());
    }

    #[test]
    fn banner_prefers_server_detail() {
        let error = ApiError::InvalidResponse {
            status_code: StatusCode::BAD_REQUEST,
            url: "http://localhost:8000/api/flash-news".to_owned(),
            detail: Some("News message cannot be empty.".to_owned()),
        };
        assert_eq!(error.message_or("Failed"), "News message cannot be empty.");
        assert_eq!(error.status_code(), Some(StatusCode::BAD_REQUEST));

        let error = ApiError::Other("connection refused".to_owned());
        assert_eq!(error.message_or("Failed to add news"), "Failed to add news");
    }
}
