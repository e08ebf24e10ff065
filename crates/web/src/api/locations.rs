use axum::{
    extract::{OriginalUri, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, on, put},
    Json, Router,
};
use directory::database::Database;
use model::{
    location::{Location, LocationUpdate},
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
        crate::api::resource!("/locations{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<Location>>))
        .route("/", get(get_locations::<D>).post(create_location::<D>))
        .route("/:id", put(update_location::<D>).delete(delete_location::<D>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_locations<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<Vec<WithId<Location>>>> {
    directory_client
        .get_locations()
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn create_location<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(location): JsonBody<WithId<Location>>,
) -> RouteResult<impl IntoResponse> {
    directory_client
        .create_location(location)
        .await
        .map(|location| {
            (
                StatusCode::CREATED,
                [(header::LOCATION, resource!("/{}", location.id))],
                Json(location),
            )
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn update_location<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<String>,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(update): JsonBody<LocationUpdate>,
) -> RouteResult<Json<WithId<Location>>> {
    directory_client
        .update_location(&Id::new(id), update)
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::PUT)
                .with_uri(original_uri.path())
        })
}

async fn delete_location<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<String>,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<DeleteResponse>> {
    directory_client
        .delete_location(&Id::new(id))
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
        response::IntoResponse,
    };
    use directory::memory::MemoryDatabase;
    use model::{
        location::{Location, LocationUpdate},
        WithId,
    };
    use pretty_assertions::assert_eq;
    use utility::id::Id;

    use super::*;

    fn uri(path: &'static str) -> OriginalUri {
        OriginalUri(Uri::from_static(path))
    }

    #[tokio::test]
    async fn created_location_is_listed() {
        let state = WebState::new(MemoryDatabase::default());
        let location = WithId::new(
            Id::new("Library".to_owned()),
            Location::new("Library", Some("Block D • Ground Floor")),
        );
        let response = create_location(
            uri("/api/locations"),
            State(state.clone()),
            JsonBody(location.clone()),
        )
        .await
        .map(IntoResponse::into_response)
        .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/api/locations/Library"
        );

        let Json(locations) = get_locations(uri("/api/locations"), State(state))
            .await
            .unwrap();
        assert_eq!(locations, vec![location]);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_bad_request() {
        let state = WebState::new(MemoryDatabase::seeded());
        let location = WithId::new(Id::new("A-101".to_owned()), Location::new("A-101", None::<String>));
        let error = create_location(uri("/api/locations"), State(state), JsonBody(location))
            .await
            .err()
            .unwrap();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            error.detail.as_deref(),
            Some("Location ID 'A-101' already exists.")
        );
        assert_eq!(error.http_method.as_deref(), Some("POST"));
    }

    #[tokio::test]
    async fn updating_unknown_location_is_not_found() {
        let state = WebState::new(MemoryDatabase::seeded());
        let update = LocationUpdate {
            label: Some("Z-999".to_owned()),
            ..Default::default()
        };
        let error = update_location(
            uri("/api/locations/Z-999"),
            PathParam("Z-999".to_owned()),
            State(state),
            JsonBody(update),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.detail.as_deref(), Some("Location not found"));
    }

    #[tokio::test]
    async fn assigned_location_is_kept() {
        let state = WebState::new(MemoryDatabase::seeded());
        let error = delete_location(
            uri("/api/locations/C-305"),
            PathParam("C-305".to_owned()),
            State(state.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);

        let Json(deleted) = delete_location(
            uri("/api/locations/A-101"),
            PathParam("A-101".to_owned()),
            State(state),
        )
        .await
        .unwrap();
        assert!(deleted.success);
    }
}
