//! Row model for account reads.

use super::schema::users;
use crate::{points::domain::UserAccount, user::UserId};
use diesel::prelude::*;

/// Query result row for accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Leaderboard balance.
    pub points: i64,
}

impl From<AccountRow> for UserAccount {
    fn from(row: AccountRow) -> Self {
        Self::new(UserId::from_uuid(row.id), row.username, row.email).with_points(row.points)
    }
}
