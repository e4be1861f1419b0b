//! `PostgreSQL` adapter for the `users` table.

mod accounts;
mod models;
mod schema;

use crate::{persistence::PersistenceError, points::ports::AccountStoreError};

pub use accounts::PostgresAccountStore;

impl From<PersistenceError> for AccountStoreError {
    fn from(err: PersistenceError) -> Self {
        Self::persistence(err)
    }
}
