//! Daily task checklist with cooldown-gated completion.
//!
//! Each user receives five tasks per calendar day. Completing one credits
//! points, starts a five-minute cooldown and bumps the day's completion
//! count; once five are done the checklist is closed until the next
//! midnight. Day rollover is lazy: the first request after midnight resets
//! the user's state. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The orchestrating engine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
