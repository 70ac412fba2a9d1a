use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::{CoordinatorConfig, GameError, SessionCoordinator};
use crate::websockets::{ConnectionManager, EventGateway, InMemoryConnectionManager};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<SessionCoordinator>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub gateway: Arc<EventGateway>,
}

impl AppState {
    pub fn new(
        coordinator: Arc<SessionCoordinator>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let gateway = Arc::new(EventGateway::new(
            Arc::clone(&coordinator),
            Arc::clone(&connection_manager),
        ));
        Self {
            coordinator,
            connection_manager,
            gateway,
        }
    }

    /// In-memory state with the given coordinator settings
    pub fn in_memory(config: CoordinatorConfig) -> Self {
        Self::new(
            Arc::new(SessionCoordinator::new(config)),
            Arc::new(InMemoryConnectionManager::new()),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<GameError> for AppError {
    fn from(error: GameError) -> Self {
        let message = error.to_string();
        match error {
            GameError::Validation(_) => AppError::BadRequest(message),
            GameError::DuplicateRegistration(_) | GameError::Precondition(_) => {
                AppError::Conflict(message)
            }
            GameError::NotFound(_) => AppError::NotFound(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
