//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, CommandError, ControlAction};
use super::responses::{
    ApiResponse, ErrorResponse, HealthResponse, SettingsCloseRequest, SettingsResponse,
    StatusResponse,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: CommandError) -> ApiError {
    let status = match &e {
        CommandError::Settings(settings) if settings.is_validation() => StatusCode::BAD_REQUEST,
        CommandError::DriverUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        CommandError::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Request failed: {}", e);
    } else {
        warn!("Request rejected: {}", e);
    }
    (status, Json(ErrorResponse::new(e.to_string())))
}

async fn control(
    state: &AppState,
    action: ControlAction,
    message: &str,
) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.control(action).await.map_err(api_error)?;
    info!("{} endpoint called - timer now {:?}", action.as_str(), snapshot.phase);
    Ok(Json(ApiResponse::ok(message.to_string(), snapshot)))
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    control(&state, ControlAction::Start, "Timer started").await
}

/// Handle POST /pause - Toggle pause, or start an idle timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    control(&state, ControlAction::PauseToggle, "Timer pause toggled").await
}

/// Handle POST /reset - Stop and restore the configured duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    control(&state, ControlAction::Reset, "Timer reset").await
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /settings - Return the values the settings form shows
pub async fn settings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = state.read_settings().await.map_err(api_error)?;
    Ok(Json(SettingsResponse {
        settings,
        timestamp: chrono::Utc::now(),
    }))
}

/// Handle POST /settings - Commit or cancel the settings dialog
pub async fn settings_close_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingsCloseRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let closed = state
        .close_settings(request.action, request.values)
        .await
        .map_err(api_error)?;

    let message = if closed.committed {
        "Settings committed"
    } else {
        "Settings unchanged"
    };
    info!("Settings endpoint called - {}", message);
    Ok(Json(ApiResponse::ok(message.to_string(), closed.snapshot)))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
