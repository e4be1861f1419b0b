//! Identifier and validated scalar types for the daily task domain.

use super::{DAILY_TASK_COUNT, DailyTaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one task of a daily set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyTaskId(Uuid);

impl DailyTaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a task identifier supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskDomainError::InvalidTaskId`] when the value is not
    /// a UUID.
    pub fn parse(raw: &str) -> Result<Self, DailyTaskDomainError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DailyTaskDomainError::InvalidTaskId(raw.to_owned()))
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for DailyTaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DailyTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressId(Uuid);

impl ProgressId {
    /// Creates a new random progress identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a progress identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ProgressId {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a task within its daily set, in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct TaskNumber(u8);

impl TaskNumber {
    /// Creates a validated task number.
    ///
    /// # Errors
    ///
    /// Returns [`DailyTaskDomainError::InvalidTaskNumber`] when the value is
    /// zero or greater than [`DAILY_TASK_COUNT`].
    pub fn new(value: i64) -> Result<Self, DailyTaskDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|number| (1..=DAILY_TASK_COUNT).contains(number))
            .map(Self)
            .ok_or(DailyTaskDomainError::InvalidTaskNumber(value))
    }

    /// Returns every task number of a set in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=DAILY_TASK_COUNT).map(Self)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for TaskNumber {
    type Error = DailyTaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskNumber> for u8 {
    fn from(number: TaskNumber) -> Self {
        number.0
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
