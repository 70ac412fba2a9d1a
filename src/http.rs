use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::game::{EventSink, GamePhase, GameSnapshot, StartCheck};
use crate::shared::{AppError, AppState};
use crate::websockets::{moderator_websocket_handler, player_websocket_handler};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSizeRequest {
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRequest {
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub phase: GamePhase,
    pub player_count: usize,
    pub team_size: usize,
    pub can_start: StartCheck,
}

/// Build the full router: websocket endpoints plus the host control API
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(player_websocket_handler))
        .route("/ws/gm", get(moderator_websocket_handler))
        .route("/api/state", get(game_state))
        .route("/api/game/status", get(game_status))
        .route("/api/game/team-size", post(set_team_size))
        .route("/api/game/phase", post(set_phase))
        .route("/api/game/reset", post(reset_game))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Full moderator snapshot
async fn game_state(State(app_state): State<AppState>) -> Json<GameSnapshot> {
    Json(app_state.coordinator.snapshot().await)
}

async fn game_status(State(app_state): State<AppState>) -> Json<StatusResponse> {
    let coordinator = &app_state.coordinator;
    Json(StatusResponse {
        phase: coordinator.phase().await,
        player_count: coordinator.player_count().await,
        team_size: coordinator.team_size().await,
        can_start: coordinator.can_start_game().await,
    })
}

async fn set_team_size(
    State(app_state): State<AppState>,
    Json(request): Json<TeamSizeRequest>,
) -> Result<Json<Value>, AppError> {
    let size = app_state.coordinator.set_team_size(request.size).await?;
    app_state.gateway.push_state().await;
    Ok(Json(json!({ "size": size })))
}

async fn set_phase(
    State(app_state): State<AppState>,
    Json(request): Json<PhaseRequest>,
) -> Result<Json<Value>, AppError> {
    let phase = GamePhase::from_str(&request.phase.to_lowercase())
        .map_err(|_| AppError::BadRequest(format!("Unknown phase: {}", request.phase)))?;

    let outcome = app_state.coordinator.set_phase(phase).await?;
    app_state.gateway.deliver(outcome.events).await;
    app_state.gateway.push_state().await;

    info!(phase = %phase, "Phase set via host API");
    Ok(Json(json!({ "phase": phase })))
}

async fn reset_game(State(app_state): State<AppState>) -> Json<Value> {
    let outcome = app_state.coordinator.reset_game().await;
    app_state.gateway.deliver(outcome.events).await;
    app_state.gateway.push_state().await;
    Json(json!({ "message": "Game reset" }))
}
