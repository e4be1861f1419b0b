//! Rewardpage: gamified daily tasks, points and weekly streaks.
//!
//! Signed-in users work through five daily tasks gated by a five-minute
//! cooldown, collect points for each completion and check in once per day
//! to build a Monday-to-Sunday streak. A points leaderboard ranks every
//! account.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: pure rules with no infrastructure dependencies
//! - **Ports**: async trait interfaces for storage
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: orchestration over the ports, with deadlines on every
//!   store call
//!
//! # Modules
//!
//! - [`daily_task`]: daily checklist, cooldown and lazy midnight reset
//! - [`points`]: account points and the leaderboard
//! - [`streak`]: weekly check-in streaks
//! - [`http`]: JSON API over the services

pub mod calendar;
pub mod clock;
pub mod config;
pub mod daily_task;
pub mod http;
pub mod persistence;
pub mod points;
pub mod streak;
pub mod telemetry;
pub mod user;
