//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, StateError},
    timer::{TimerError, TimerId, TimerSnapshot, TimerStatus, TIMER_DURATION},
};
use super::responses::{
    ApiResponse, CreateTimerRequest, DeleteQuery, ErrorResponse, HealthResponse, ListQuery,
    StatusResponse, TimerView,
};

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

impl From<StateError> for (StatusCode, Json<ErrorResponse>) {
    fn from(e: StateError) -> Self {
        match &e {
            StateError::Timer(TimerError::InvalidName) => {
                warn!("Rejected request: {}", e);
                api_error(StatusCode::BAD_REQUEST, e.to_string())
            }
            StateError::Timer(TimerError::NotFound(_)) => {
                warn!("Rejected request: {}", e);
                api_error(StatusCode::NOT_FOUND, e.to_string())
            }
            StateError::Lock(_) => {
                error!("Timer state unavailable: {}", e);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

/// Extractor rejections get the same JSON error body as every other failure
trait IntoApiError {
    fn into_api_error(self) -> ApiError;
}

macro_rules! rejection_to_api_error {
    ($($rejection:ty),*) => {
        $(
            impl IntoApiError for $rejection {
                fn into_api_error(self) -> ApiError {
                    let rejection = self;
                    warn!("Rejected malformed request: {}", rejection.body_text());
                    api_error(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

rejection_to_api_error!(JsonRejection, PathRejection, QueryRejection);

/// Build a mutation response carrying the list as it is after the change
fn respond(state: &AppState, message: String) -> Result<Json<ApiResponse>, ApiError> {
    let timers = state.list()?;
    Ok(Json(ApiResponse::ok(message, &timers)))
}

/// Handle GET /timers - List timers in the requested display order
pub async fn list_timers_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<TimerView>>, ApiError> {
    let Query(query) = query.map_err(IntoApiError::into_api_error)?;
    let mut timers = state.list()?;
    query.order.apply(&mut timers);
    Ok(Json(timers.iter().map(TimerView::from).collect()))
}

/// Handle POST /timers - Create a new timer
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CreateTimerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let Json(request) = request.map_err(IntoApiError::into_api_error)?;
    let timer = state.add_timer(&request.name)?;
    let response = respond(&state, format!("Timer \"{}\" created", timer.name))?;
    Ok((StatusCode::CREATED, response))
}

/// Handle GET /timers/:id - Return a single timer
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<TimerView>, ApiError> {
    let timer = state.get(timer_id(path)?)?;
    Ok(Json(TimerView::from(&timer)))
}

/// Handle POST /timers/:id/pause
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let timer = state.pause(timer_id(path)?)?;
    respond(&state, format!("Timer \"{}\" is {}", timer.name, describe(&timer)))
}

/// Handle POST /timers/:id/resume
pub async fn resume_timer_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let timer = state.resume(timer_id(path)?)?;
    respond(&state, format!("Timer \"{}\" is {}", timer.name, describe(&timer)))
}

/// Handle POST /timers/:id/toggle - The single pause/resume button
pub async fn toggle_timer_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let timer = state.toggle(timer_id(path)?)?;
    respond(&state, format!("Timer \"{}\" is {}", timer.name, describe(&timer)))
}

/// Handle DELETE /timers/:id - Remove a timer.
///
/// A timer that has not finished yet is only removed when the client
/// confirms with `?confirm=true`.
pub async fn delete_timer_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = timer_id(path)?;
    let Query(query) = query.map_err(IntoApiError::into_api_error)?;
    let timer = state.get(id)?;

    if !timer.is_finished() && !query.confirm {
        info!("Delete of unfinished timer {} needs confirmation", id);
        return Err(api_error(
            StatusCode::CONFLICT,
            format!(
                "Timer \"{}\" is {} ({}). Repeat with confirm=true to delete it.",
                timer.name,
                describe(&timer),
                timer.display()
            ),
        ));
    }

    let removed = state.delete(id)?;
    respond(&state, format!("Timer \"{}\" deleted", removed.name))
}

/// Handle POST /clear-finished
pub async fn clear_finished_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, ApiError> {
    let cleared = state.clear_finished()?;
    respond(&state, format!("Cleared {} finished timers", cleared))
}

/// Handle GET /status - Status bar summary
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let counts = state.counts()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        active: counts.active,
        finished: counts.finished,
        timer_duration_seconds: TIMER_DURATION.as_secs(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

fn timer_id(path: Result<Path<u64>, PathRejection>) -> Result<TimerId, ApiError> {
    let Path(id) = path.map_err(IntoApiError::into_api_error)?;
    Ok(TimerId(id))
}

fn describe(timer: &TimerSnapshot) -> &'static str {
    match timer.status {
        TimerStatus::Running => "running",
        TimerStatus::Paused => "paused",
        TimerStatus::Finished => "finished",
    }
}
