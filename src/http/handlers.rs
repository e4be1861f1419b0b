//! Request handlers.

use super::{
    ApiError, AppState, CheckInResponse, CompleteTaskRequest, CompleteTaskResponse,
    CooldownResponse, CurrentUser, DailyTasksResponse, LeaderboardEntryResponse,
    LeaderboardQuery, StreakCountResponse, StreakResponse,
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// `GET /health`.
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /api/tasks/daily`: today's tasks and progress.
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unauthenticated or the stores
/// fail.
pub async fn daily_tasks(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DailyTasksResponse>, ApiError> {
    let overview = state.daily_tasks().daily_overview(user_id).await?;
    Ok(Json(DailyTasksResponse::from(&overview)))
}

/// `POST /api/tasks/complete`: completes one task.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for an unreadable body or a missing
/// `taskId`, and the mapped engine error otherwise.
pub async fn complete_task(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    body: Result<Json<CompleteTaskRequest>, JsonRejection>,
) -> Result<Json<CompleteTaskResponse>, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::InvalidInput("invalid request".to_owned()))?;
    let task_id = request
        .task_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("taskId required".to_owned()))?;

    let receipt = state.daily_tasks().complete_task(user_id, &task_id).await?;
    Ok(Json(CompleteTaskResponse::from(&receipt)))
}

/// `GET /api/tasks/cooldown`.
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unauthenticated or the stores
/// fail.
pub async fn cooldown_status(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CooldownResponse>, ApiError> {
    let status = state.daily_tasks().cooldown_status(user_id).await?;
    Ok(Json(CooldownResponse::from(status)))
}

/// `GET /api/leaderboard?limit=`.
///
/// An unparsable `limit` falls back to the default row count.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] when the account store fails.
pub async fn leaderboard(
    State(state): State<AppState>,
    _caller: CurrentUser,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.ok().and_then(|Query(params)| params.limit);
    let entries: Vec<LeaderboardEntryResponse> = state
        .leaderboard()
        .top(limit)
        .await?
        .into_iter()
        .map(LeaderboardEntryResponse::from)
        .collect();
    Ok(([(header::CACHE_CONTROL, NO_CACHE)], Json(entries)))
}

/// `GET /api/leaderboard/me`: the caller's own rank.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the caller has no account.
pub async fn my_rank(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state.leaderboard().rank_of(user_id).await?;
    Ok((
        [(header::CACHE_CONTROL, NO_CACHE)],
        Json(LeaderboardEntryResponse::from(entry)),
    ))
}

/// `GET /api/streak`: the current week's check-ins.
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unauthenticated or the store
/// fails.
pub async fn streak(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<StreakResponse>, ApiError> {
    let current = state.streaks().current(user_id).await?;
    Ok(Json(StreakResponse::from(&current)))
}

/// `POST /api/streak/update`: checks in for today.
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unauthenticated or the store
/// fails.
pub async fn check_in(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CheckInResponse>, ApiError> {
    let outcome = state.streaks().check_in(user_id).await?;
    Ok(Json(CheckInResponse::from(&outcome)))
}

/// `GET /api/streak/count`.
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unauthenticated or the store
/// fails.
pub async fn streak_count(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<StreakCountResponse>, ApiError> {
    let count = state.streaks().count(user_id).await?;
    Ok(Json(StreakCountResponse { count }))
}
