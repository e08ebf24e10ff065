use axum::{
    response::IntoResponse,
    routing::{get, on},
    Json, Router,
};
use directory::database::Database;
use serde_json::json;

mod analytics;
mod faculty;
mod flash_news;
mod locations;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .nest_service("/locations", locations::routes(state.clone()))
        .nest_service("/faculty", faculty::routes(state.clone()))
        .nest_service("/flash-news", flash_news::routes(state.clone()))
        .nest_service("/analytics", analytics::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong"
    }))
}
