//! Unit tests for the daily task context.
