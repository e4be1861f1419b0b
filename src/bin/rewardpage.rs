//! Runs the reward backend HTTP server.
//!
//! Usage:
//!
//! ```text
//! rewardpage [--bind 127.0.0.1:8080] [--database-url postgres://...]
//! ```
//!
//! With a database URL the server applies the schema and serves from
//! `PostgreSQL`; without one it keeps all state in memory, which is only
//! suitable for local experiments. Every flag can also be given through the
//! environment variable named in `--help`.

use clap::Parser;
use mockable::{Clock, DefaultClock};
use rewardpage::{
    config::{ConfigError, ServerConfig},
    daily_task::{
        adapters::{
            memory::{InMemoryDailyTaskStore, InMemoryProgressTracker},
            postgres::{PostgresDailyTaskStore, PostgresProgressTracker},
        },
        ports::{DailyTaskStore, ProgressTracker},
        services::{DailyTaskEngine, SharedDailyTaskEngine},
    },
    http::{
        AppState, ForwardedUserHeader, SharedLeaderboardService, SharedStreakService, router,
    },
    persistence::{PersistenceError, apply_schema, build_pool},
    points::{
        adapters::{memory::InMemoryAccountStore, postgres::PostgresAccountStore},
        ports::{LeaderboardRepository, PointsLedger},
        services::LeaderboardService,
    },
    streak::{
        adapters::{memory::InMemoryStreakRepository, postgres::PostgresStreakRepository},
        ports::StreakRepository,
        services::StreakService,
    },
    telemetry::{TelemetryError, init_tracing},
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection checkout bound while building the pool.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that abort start-up.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("database initialisation failed: {0}")]
    Database(#[from] PersistenceError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
}

/// Port implementations selected at start-up.
struct Backends {
    tasks: Arc<dyn DailyTaskStore>,
    progress: Arc<dyn ProgressTracker>,
    ledger: Arc<dyn PointsLedger>,
    ranking: Arc<dyn LeaderboardRepository>,
    streaks: Arc<dyn StreakRepository>,
}

impl Backends {
    fn in_memory() -> Self {
        let accounts = Arc::new(InMemoryAccountStore::new());
        Self {
            tasks: Arc::new(InMemoryDailyTaskStore::new()),
            progress: Arc::new(InMemoryProgressTracker::new()),
            ledger: accounts.clone(),
            ranking: accounts,
            streaks: Arc::new(InMemoryStreakRepository::new()),
        }
    }

    async fn postgres(config: &ServerConfig, database_url: String) -> Result<Self, StartupError> {
        let pool_size = config.pool_size;
        let pool = tokio::task::spawn_blocking(move || {
            build_pool(&database_url, pool_size, POOL_CONNECTION_TIMEOUT)
        })
        .await
        .map_err(PersistenceError::from)??;
        apply_schema(&pool).await?;

        let accounts = Arc::new(PostgresAccountStore::new(pool.clone()));
        Ok(Self {
            tasks: Arc::new(PostgresDailyTaskStore::new(pool.clone())),
            progress: Arc::new(PostgresProgressTracker::new(pool.clone())),
            ledger: accounts.clone(),
            ranking: accounts,
            streaks: Arc::new(PostgresStreakRepository::new(pool)),
        })
    }
}

fn assemble(config: &ServerConfig, backends: Backends) -> Result<AppState, StartupError> {
    let zone = config.calendar_zone()?;
    let store_timeout = config.store_timeout()?;
    let identity = ForwardedUserHeader::new(config.identity_header()?);
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);

    let engine: SharedDailyTaskEngine = DailyTaskEngine::new(
        backends.tasks,
        backends.progress,
        Arc::clone(&backends.ledger),
        Arc::clone(&clock),
        zone,
    )
    .with_store_timeout(store_timeout);
    let leaderboard: SharedLeaderboardService =
        LeaderboardService::new(backends.ranking).with_store_timeout(store_timeout);
    let streaks: SharedStreakService =
        StreakService::new(backends.streaks, backends.ledger, clock, zone)
            .with_store_timeout(store_timeout);

    Ok(AppState::new(
        Arc::new(engine),
        Arc::new(leaderboard),
        Arc::new(streaks),
        Arc::new(identity),
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(event = "signal_error", error = %err);
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::parse();
    init_tracing(&config.log_filter).map_err(StartupError::from)?;

    let backends = match config.database_url.clone() {
        Some(database_url) => Backends::postgres(&config, database_url).await?,
        None => {
            warn!(
                event = "in_memory_stores",
                "DATABASE_URL not set, state will be lost on exit"
            );
            Backends::in_memory()
        }
    };
    let state = assemble(&config, backends)?;

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind,
            source,
        })?;
    info!(event = "server_start", addr = %config.bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(event = "server_stop");
    Ok(())
}
