use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, OriginalUri, Query, Request,
    },
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use directory::RequestError;
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};

pub type RouteResult<O> = Result<O, RouteErrorResponse>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// `axum::Json`, but a malformed body is answered with a `RouteErrorResponse`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RouteErrorResponse))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path`, but an unparsable segment is answered with a
/// `RouteErrorResponse`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RouteErrorResponse))]
pub struct PathParam<T>(pub T);

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responeses -

/// Error body of every failed request, e.g.
/// `{"detail": "Location not found", "http_method": "PUT", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            detail: None,
            http_method: None,
            requested_uri: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_detail()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_default_detail(self) -> Self {
        let detail = self
            .status_code
            .canonical_reason()
            .unwrap_or(INTERNAL_SERVER_ERROR);
        self.with_detail(detail)
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NotFound(detail) => {
                Self::new(StatusCode::NOT_FOUND).with_detail(detail)
            }
            RequestError::Invalid(detail) => {
                Self::new(StatusCode::BAD_REQUEST).with_detail(detail)
            }
            RequestError::Other(why) => {
                log::error!("Request failed: {}", why);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_detail(INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<JsonRejection> for RouteErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status()).with_detail(rejection.body_text())
    }
}

impl From<PathRejection> for RouteErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status()).with_detail(rejection.body_text())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}
