//! Adapter implementations of the streak repository.

pub mod memory;
pub mod postgres;
