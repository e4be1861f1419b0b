//! Adapter implementations of the daily task ports.

pub mod memory;
pub mod postgres;
