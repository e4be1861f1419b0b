//! Mapping of service outcomes onto HTTP responses.

use super::IdentityError;
use crate::{
    daily_task::{
        domain::CompletionRejection, ports::ProgressTrackerError, services::DailyTaskError,
    },
    points::services::LeaderboardError,
    streak::services::StreakError,
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
    /// Seconds until the cooldown ends, for cooldown rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<i64>,
}

/// Error returned by handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The caller is not authenticated.
    #[error("unauthorized")]
    Unauthorized,
    /// The request is malformed.
    #[error("{0}")]
    InvalidInput(String),
    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The request conflicts with current state.
    #[error("{0}")]
    Conflict(String),
    /// A completion arrived inside the cooldown.
    #[error("cooldown active, wait {remaining_seconds} seconds")]
    CooldownActive {
        /// Whole seconds until the cooldown ends.
        remaining_seconds: i64,
    },
    /// Infrastructure failure; details are only logged.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Returns the status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the JSON payload for this error.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let remaining_seconds = match self {
            Self::CooldownActive { remaining_seconds } => Some(*remaining_seconds),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            remaining_seconds,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(_: IdentityError) -> Self {
        Self::Unauthorized
    }
}

impl From<DailyTaskError> for ApiError {
    fn from(err: DailyTaskError) -> Self {
        match err {
            DailyTaskError::Domain(domain) => Self::InvalidInput(domain.to_string()),
            DailyTaskError::Rejected(CompletionRejection::CooldownActive { remaining_seconds }) => {
                Self::CooldownActive { remaining_seconds }
            }
            DailyTaskError::Rejected(rejection @ CompletionRejection::LimitReached { .. }) => {
                Self::Conflict(rejection.to_string())
            }
            DailyTaskError::TaskNotFound(_) => Self::NotFound("task not found".to_owned()),
            DailyTaskError::TaskAlreadyCompleted(_) => {
                Self::Conflict("task already completed".to_owned())
            }
            DailyTaskError::Progress(ProgressTrackerError::Conflict(_)) => {
                Self::Conflict("concurrent update, retry the request".to_owned())
            }
            DailyTaskError::TaskStore(_)
            | DailyTaskError::Progress(_)
            | DailyTaskError::Timeout(_) => Self::Internal,
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::UserNotFound(_) => Self::NotFound("user not found".to_owned()),
            LeaderboardError::Repository(_) | LeaderboardError::Timeout(_) => Self::Internal,
        }
    }
}

impl From<StreakError> for ApiError {
    fn from(err: StreakError) -> Self {
        match err {
            StreakError::Conflict(_) => {
                Self::Conflict("concurrent check-in, retry the request".to_owned())
            }
            StreakError::Repository(_) | StreakError::Timeout(_) => Self::Internal,
        }
    }
}
