//! Database models
//!
//! Data models for rows of the task store. Timestamps are stored as ISO8601
//! strings (TEXT in SQLite) and decoded into `chrono::DateTime<Utc>` by the
//! repositories.

pub mod task;

pub use task::Task;
