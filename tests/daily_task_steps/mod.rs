//! Step definitions for daily task scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
