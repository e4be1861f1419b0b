//! In-memory account store.

mod accounts;

pub use accounts::InMemoryAccountStore;
