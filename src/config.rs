//! Server configuration from command-line flags and environment.

use crate::{calendar::CalendarZone, http::DEFAULT_IDENTITY_HEADER};
use axum::http::HeaderName;
use chrono::FixedOffset;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while interpreting configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The calendar offset lies outside ±24 hours.
    #[error("utc offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),
    /// The identity header is not a valid header name.
    #[error("invalid identity header name: {0}")]
    InvalidIdentityHeader(String),
    /// A zero datastore timeout would fail every call.
    #[error("store timeout must be at least one second")]
    ZeroStoreTimeout,
}

/// Settings for the reward backend server.
#[derive(Debug, Clone, Parser)]
#[command(name = "rewardpage", about = "Daily tasks, streaks and leaderboard backend")]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "REWARDPAGE_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection string; in-memory stores are used when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "REWARDPAGE_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Upper bound in seconds on each datastore call.
    #[arg(long, env = "REWARDPAGE_STORE_TIMEOUT_SECS", default_value_t = 10)]
    pub store_timeout_secs: u64,

    /// Fixed UTC offset in minutes whose midnight starts a day; the server's
    /// local timezone is used when unset.
    #[arg(long, env = "REWARDPAGE_UTC_OFFSET_MINUTES", allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Header carrying the authenticated user id.
    #[arg(long, env = "REWARDPAGE_IDENTITY_HEADER", default_value = DEFAULT_IDENTITY_HEADER)]
    pub identity_header: String,

    /// Tracing filter directives.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    /// Returns the zone whose midnight delimits days.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUtcOffset`] when the offset is out of
    /// range.
    pub fn calendar_zone(&self) -> Result<CalendarZone, ConfigError> {
        self.utc_offset_minutes.map_or(Ok(CalendarZone::ServerLocal), |minutes| {
            minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .map(CalendarZone::Fixed)
                .ok_or(ConfigError::InvalidUtcOffset(minutes))
        })
    }

    /// Returns the per-call datastore deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroStoreTimeout`] for a zero timeout.
    pub const fn store_timeout(&self) -> Result<Duration, ConfigError> {
        if self.store_timeout_secs == 0 {
            return Err(ConfigError::ZeroStoreTimeout);
        }
        Ok(Duration::from_secs(self.store_timeout_secs))
    }

    /// Returns the identity header as a header name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIdentityHeader`] when the configured
    /// value is not a valid header name.
    pub fn identity_header(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::try_from(self.identity_header.trim().to_ascii_lowercase())
            .map_err(|_| ConfigError::InvalidIdentityHeader(self.identity_header.clone()))
    }
}
