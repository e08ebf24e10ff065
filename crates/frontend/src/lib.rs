//! Client side state of the campus navigator: the view shell, per-view
//! directory caches, the route finder, faculty self-service and the admin
//! panels. Everything talks to the backend through [`api::DirectoryApi`].

use std::{env, error, fmt};

pub mod api;
pub mod availability;
pub mod directory;
pub mod finder;
pub mod optimistic;
pub mod panels;
pub mod route;
pub mod search;
pub mod shell;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base url every endpoint path is appended to, without trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("CAMPUS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
        }
    }
}

/// Input rejected before any request was sent.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    MissingFields(&'static str),
    SameEndpoints,
    UnknownLocation(String),
}

impl error::Error for FormError {}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormError::MissingFields(message) => write!(f, "{message}"),
            FormError::SameEndpoints => write!(
                f,
                "Please select different locations for \"From\" and \"To\""
            ),
            FormError::UnknownLocation(id) => write!(f, "Location ID '{id}' does not exist."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_errors_read_like_alerts() {
        assert_eq!(
            FormError::SameEndpoints.to_string(),
            "Please select different locations for \"From\" and \"To\""
        );
        assert_eq!(
            FormError::UnknownLocation("Z-1".to_owned()).to_string(),
            "Location ID 'Z-1' does not exist."
        );
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8000/api");
    }
}
