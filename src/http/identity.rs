//! Caller identity resolution.

use super::{ApiError, AppState};
use crate::user::UserId;
use axum::extract::FromRequestParts;
use axum::http::{HeaderName, request::Parts};
use thiserror::Error;

/// Header carrying the authenticated user id when none is configured.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Reasons a request carries no usable identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The request names no user.
    #[error("missing user identity")]
    Missing,
    /// The identity value is not a valid user id.
    #[error("malformed user identity")]
    Malformed,
}

/// Resolves the user on whose behalf a request is made.
pub trait IdentityResolver: Send + Sync {
    /// Returns the caller's user id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the request is unauthenticated.
    fn current_user_id(&self, parts: &Parts) -> Result<UserId, IdentityError>;
}

/// Trusts a user id header set by an authenticating gateway.
#[derive(Debug, Clone)]
pub struct ForwardedUserHeader {
    header: HeaderName,
}

impl ForwardedUserHeader {
    /// Creates a resolver reading `header`.
    #[must_use]
    pub const fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl Default for ForwardedUserHeader {
    fn default() -> Self {
        Self::new(HeaderName::from_static(DEFAULT_IDENTITY_HEADER))
    }
}

impl IdentityResolver for ForwardedUserHeader {
    fn current_user_id(&self, parts: &Parts) -> Result<UserId, IdentityError> {
        let value = parts
            .headers
            .get(&self.header)
            .ok_or(IdentityError::Missing)?;
        let raw = value.to_str().map_err(|_| IdentityError::Malformed)?;
        if raw.trim().is_empty() {
            return Err(IdentityError::Missing);
        }
        raw.parse().map_err(|_| IdentityError::Malformed)
    }
}

/// Extractor yielding the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity()
            .current_user_id(parts)
            .map(Self)
            .map_err(ApiError::from)
    }
}
