//! Service layer for weekly check-ins.

mod check_in;

pub use check_in::{StreakCheckIn, StreakError, StreakResult, StreakService};
