use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Json, Router,
};
use directory::database::Database;
use model::analytics::AnalyticsData;

use crate::{
    common::{route_not_found, schema, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<AnalyticsData>))
        .route("/", get(get_analytics::<D>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_analytics<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { directory_client }): State<WebState<D>>,
) -> RouteResult<Json<AnalyticsData>> {
    directory_client
        .get_analytics()
        .await
        .map(Json)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}
