//! In-memory streak repository.

mod repository;

pub use repository::InMemoryStreakRepository;
