//! Persistence plumbing shared by every `PostgreSQL` adapter.

mod deadline;
mod postgres;

pub use deadline::{DEFAULT_STORE_TIMEOUT, DeadlineElapsed, with_deadline};
pub use postgres::{PersistenceError, PgPool, SCHEMA_SQL, apply_schema, build_pool, run_blocking};
