//! Unit tests for the points context.
