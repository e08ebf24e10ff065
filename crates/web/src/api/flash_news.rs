use axum::{
    extract::{OriginalUri, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, on},
    Json, Router,
};
use directory::database::Database;
use model::{flash_news::FlashNews, DeleteResponse, WithId};
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
        crate::api::resource!("/flash-news{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<WithId<FlashNews>>))
        .route("/", get(get_flash_news::<D>).post(create_flash_news::<D>))
        .route("/:id", delete(delete_flash_news::<D>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_flash_news<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<Vec<WithId<FlashNews>>>> {
    directory_client
        .get_flash_news()
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn create_flash_news<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
    JsonBody(news): JsonBody<FlashNews>,
) -> RouteResult<impl IntoResponse> {
    directory_client
        .create_flash_news(news)
        .await
        .map(|news| {
            (
                StatusCode::CREATED,
                [(header::LOCATION, resource!("/{}", news.id))],
                Json(news),
            )
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn delete_flash_news<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    PathParam(id): PathParam<i32>,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<DeleteResponse>> {
    directory_client
        .delete_flash_news(&Id::new(id))
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::DELETE)
                .with_uri(original_uri.path())
        })
}
