//! `PostgreSQL` connection pooling and blocking offload.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;
use thiserror::Error;

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied at start-up; every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-16-000000_create_reward_tables/up.sql");

/// Infrastructure failures shared by the `PostgreSQL` adapters.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking worker panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// A query failed.
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    /// A stored value could not be mapped back into the domain.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PersistenceError::Pool`] when the pool cannot open its initial
/// connections.
pub fn build_pool(
    database_url: &str,
    max_size: u32,
    connection_timeout: Duration,
) -> Result<PgPool, PersistenceError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .build(manager)?)
}

/// Creates any missing tables and indexes.
///
/// # Errors
///
/// Returns [`PersistenceError`] when a connection cannot be obtained or a
/// statement fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), PersistenceError> {
    run_blocking(pool, |connection| {
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await
}

/// Runs a Diesel operation on the blocking thread pool.
///
/// Keeps synchronous driver calls off the async executor's worker threads.
///
/// # Errors
///
/// Returns whatever `f` returns, or the caller's error built from a
/// [`PersistenceError`] when no connection is available or the worker fails.
pub async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<PersistenceError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(|err| E::from(PersistenceError::from(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| E::from(PersistenceError::from(err)))?
}
