//! Task store over SQLite
//!
//! This crate demonstrates the basic relational access patterns against a
//! single `tasks` table: batch insert inside one transaction, full scan,
//! filtered scan and lookup by primary key. Every operation runs under a
//! caller-supplied [`OpContext`] that bounds how long it may take.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use taskstore::{DatabaseConnection, OpContext, TaskRepository, TaskStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let db = Arc::new(DatabaseConnection::open("sqlite::memory:").await?);
//! let repo = TaskRepository::new(db.clone());
//!
//! let ctx = OpContext::with_timeout(Duration::from_secs(3));
//! let id = repo.create(&ctx, "Buy milk").await?;
//! let task = repo.find_by_id(&ctx, id).await?;
//! assert_eq!(task.title, "Buy milk");
//!
//! db.close().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod db;
pub mod demo;
pub mod output;

pub use config::DemoConfig;
pub use context::OpContext;
pub use db::{DatabaseConnection, DatabaseError, DbResult, Task, TaskRepository, TaskStore};
pub use demo::{run_demo, DemoError, DemoReport, DemoStep};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
