//! Weekly check-in streak.
//!
//! A user checks in at most once per calendar day. The seven weekday flags
//! cover the current ISO week and are cleared lazily by the first check-in
//! of a new week.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
