//! Database module for taskstore
//!
//! Provides database connectivity, the task model, the task repository and
//! error handling for the `tasks` table.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{redact_url, DatabaseConnection, DatabasePool};
pub use error::{DatabaseError, DbResult};
pub use models::Task;
pub use repositories::{TaskRepository, TaskStore};
