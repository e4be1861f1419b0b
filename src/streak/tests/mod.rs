//! Unit tests for the streak context.

mod domain_tests;
