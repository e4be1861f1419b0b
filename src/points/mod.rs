//! Points ledger and leaderboard.
//!
//! User accounts belong to the identity subsystem. This context only reads
//! them for ranking and adjusts their `points` counter through the
//! [`ports::PointsLedger`] contract.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
