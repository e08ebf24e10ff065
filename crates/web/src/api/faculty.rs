use axum::{
    extract::{OriginalUri, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, on, post, put},
    Json, Router,
};
use directory::database::Database;
use model::{
    account::{FacultyLogin, LoginResponse},
    faculty::{AvailabilityUpdate, Faculty, FacultyProfileUpdate, NewFaculty},
    DeleteResponse, WithId,
};
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema, JsonBody, PathParam, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/faculty{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<Faculty>>))
        .route("/", get(get_faculty_list::<D>).post(create_faculty::<D>))
        .route("/login", post(login::<D>))
        .route(
            "/:id",
            get(get_faculty::<D>)
                .put(update_faculty::<D>)
                .delete(delete_faculty::<D>),
        )
        .route("/:id/availability", put(update_availability::<D>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_faculty_list<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<Vec<WithId<Faculty>>>> {
    directory_client
        .get_faculty_list()
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_faculty<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<i32>,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<WithId<Faculty>>> {
    directory_client
        .get_faculty(&Id::new(id))
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn create_faculty<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(faculty): JsonBody<NewFaculty>,
) -> RouteResult<impl IntoResponse> {
    directory_client
        .create_faculty(faculty)
        .await
        .map(|faculty| {
            (
                StatusCode::CREATED,
                [(header::LOCATION, resource!("/{}", faculty.id))],
                Json(faculty),
            )
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn login<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(login): JsonBody<FacultyLogin>,
) -> RouteResult<Json<LoginResponse>> {
    directory_client
        .faculty_login(login)
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn update_faculty<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<i32>,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(update): JsonBody<FacultyProfileUpdate>,
) -> RouteResult<Json<WithId<Faculty>>> {
    directory_client
        .update_faculty(&Id::new(id), update)
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::PUT)
                .with_uri(original_uri.path())
        })
}

async fn update_availability<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<i32>,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(update): JsonBody<AvailabilityUpdate>,
) -> RouteResult<Json<WithId<Faculty>>> {
    directory_client
        .set_availability(&Id::new(id), update.availability)
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::PUT)
                .with_uri(original_uri.path())
        })
}

async fn delete_faculty<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<i32>,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<DeleteResponse>> {
    directory_client
        .delete_faculty(&Id::new(id))
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::DELETE)
                .with_uri(original_uri.path())
        })
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{OriginalUri, State},
        http::{StatusCode, Uri},
    };
    use directory::memory::MemoryDatabase;
    use model::{account::FacultyLogin, faculty::AvailabilityUpdate};
    use pretty_assertions::assert_eq;

    use super::*;

    fn uri(path: &'static str) -> OriginalUri {
        OriginalUri(Uri::from_static(path))
    }

    #[tokio::test]
    async fn login_then_toggle_availability() {
        let state = WebState::new(MemoryDatabase::seeded());
        let Json(response) = login(
            uri("/api/faculty/login"),
            State(state.clone()),
            JsonBody(FacultyLogin {
                username: " JDoe ".to_owned(),
            }),
        )
        .await
        .unwrap();
        assert!(response.success);
        let faculty_id = response.faculty_id.unwrap();

        let Json(faculty) = update_availability(
            uri("/api/faculty/1/availability"),
            PathParam(faculty_id.raw()),
            State(state.clone()),
            JsonBody(AvailabilityUpdate {
                availability: false,
            }),
        )
        .await
        .unwrap();
        assert!(!faculty.content.availability);

        let Json(faculty) = get_faculty(
            uri("/api/faculty/1"),
            PathParam(faculty_id.raw()),
            State(state),
        )
        .await
        .unwrap();
        assert!(!faculty.content.availability);
    }

    #[tokio::test]
    async fn unknown_username_is_not_an_error() {
        let state = WebState::new(MemoryDatabase::seeded());
        let Json(response) = login(
            uri("/api/faculty/login"),
            State(state),
            JsonBody(FacultyLogin {
                username: "someone".to_owned(),
            }),
        )
        .await
        .unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "Invalid faculty username");
        assert_eq!(response.faculty_id, None);
    }

    #[tokio::test]
    async fn empty_profile_update_is_rejected() {
        let state = WebState::new(MemoryDatabase::seeded());
        let error = update_faculty(
            uri("/api/faculty/1"),
            PathParam(1),
            State(state),
            JsonBody(FacultyProfileUpdate::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.detail.as_deref(), Some("No update data provided"));
    }

    #[tokio::test]
    async fn deleted_faculty_is_gone() {
        let state = WebState::new(MemoryDatabase::seeded());
        let Json(deleted) =
            delete_faculty(uri("/api/faculty/1"), PathParam(1), State(state.clone()))
                .await
                .unwrap();
        assert_eq!(deleted.message, "Faculty member deleted successfully");
        let error = get_faculty(uri("/api/faculty/1"), PathParam(1), State(state))
            .await
            .unwrap_err();
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.detail.as_deref(), Some("Faculty not found"));
    }
}
