//! Repository pattern implementations for database access
//!
//! Repositories translate domain-level operations into parameterized SQL
//! against a shared connection and map rows back into models.

pub mod task_repo;

pub use task_repo::{TaskRepository, TaskStore};
