pub use crate::common::RouteResult;

use std::{env, io};

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use directory::{client::Client, database::Database};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod api;
pub mod common;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub bind_address: String,
    /// Origin of the browser front-end that may call the API.
    pub allowed_origin: String,
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("WEB_BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned()),
            allowed_origin: env::var("WEB_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_owned()),
        }
    }

    pub fn cors_layer(&self) -> io::Result<CorsLayer> {
        let origin = HeaderValue::from_str(&self.allowed_origin)
            .map_err(|why| io::Error::new(io::ErrorKind::InvalidInput, why))?;
        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true))
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebState<D: Database> {
    pub directory_client: Client<D>,
}

impl<D: Database> WebState<D> {
    pub fn new(database: D) -> Self {
        Self {
            directory_client: Client::new(database),
        }
    }
}

pub fn router<D: Database>(config: &WebConfig, state: WebState<D>) -> io::Result<Router> {
    Ok(Router::new()
        .route("/", get(welcome))
        .nest_service("/api", api::routes(state))
        .layer(config.cors_layer()?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        ))
}

pub async fn start_web_server<D: Database>(
    config: WebConfig,
    state: WebState<D>,
) -> io::Result<()> {
    let routes = router(&config, state)?;

    let listener = TcpListener::bind(&config.bind_address).await?;
    log::info!(
        "Listening on {}, accepting requests from {}",
        config.bind_address,
        config.allowed_origin
    );
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

async fn welcome() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to the Campus Navigator API"
    }))
}
