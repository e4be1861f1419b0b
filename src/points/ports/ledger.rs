//! Narrow increment interface onto the user record.

use crate::user::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Result type for account store operations.
pub type AccountStoreResult<T> = Result<T, AccountStoreError>;

/// Adjusts a user's point balance.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PointsLedger: Send + Sync {
    /// Adds `delta` points to the user's balance.
    ///
    /// # Errors
    ///
    /// Returns [`AccountStoreError::UserNotFound`] when the account does not
    /// exist.
    async fn add_points(&self, user_id: UserId, delta: i64) -> AccountStoreResult<()>;
}

/// Errors returned by account store implementations.
#[derive(Debug, Clone, Error)]
pub enum AccountStoreError {
    /// The account does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccountStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
