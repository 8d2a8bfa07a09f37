use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::templates::{NotFoundTemplate, ServerErrorTemplate};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Missing entities render the 404 page; everything else that escapes a
/// handler renders the 500 page. Write failures never reach this point --
/// handlers catch them and surface a flash notice instead.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                warn!("{} not found", what);
                render_error_page(StatusCode::NOT_FOUND, NotFoundTemplate)
            }
            err => {
                error!("Request failed: {}", err);
                render_error_page(StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate)
            }
        }
    }
}

fn render_error_page<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(_) => status.into_response(),
    }
}
