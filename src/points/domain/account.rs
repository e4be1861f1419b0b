//! Read model of a user account.

use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// Public account fields needed for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    id: UserId,
    username: String,
    email: String,
    points: i64,
}

impl UserAccount {
    /// Creates an account with zero points.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            points: 0,
        }
    }

    /// Sets the starting point balance.
    #[must_use]
    pub const fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the point balance.
    #[must_use]
    pub const fn points(&self) -> i64 {
        self.points
    }

    /// Adjusts the balance by `delta`, saturating at the `i64` bounds.
    pub const fn add_points(&mut self, delta: i64) {
        self.points = self.points.saturating_add(delta);
    }
}
