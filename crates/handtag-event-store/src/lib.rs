//! Durable local storage for matches and their event logs.

pub mod schema;
pub mod sqlite_repository;

pub use sqlite_repository::SqliteRepository;
