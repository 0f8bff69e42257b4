//! Task repository for database operations

use crate::context::OpContext;
use crate::db::connection::DatabaseConnection;
use crate::db::error::{DatabaseError, DbResult};
use crate::db::models::Task;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Executor, Row, Statement};
use std::sync::Arc;
use tracing::{debug, warn};

const INSERT_TASK_RETURNING_ID: &str = "INSERT INTO tasks (title) VALUES (?) RETURNING id";
const INSERT_TASK: &str = "INSERT INTO tasks (title) VALUES (?)";
const SELECT_ALL_TASKS: &str =
    "SELECT id, title, done, created_at FROM tasks ORDER BY id ASC";
const SELECT_TASKS_BY_DONE: &str =
    "SELECT id, title, done, created_at FROM tasks WHERE done = ? ORDER BY id ASC";
const SELECT_TASK_BY_ID: &str = "SELECT id, title, done, created_at FROM tasks WHERE id = ?";

/// Operations over the `tasks` table
///
/// Every call is bounded by the given [`OpContext`]; a timeout or
/// cancellation surfaces as a cancellation-kind [`DatabaseError`].
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert one task and return its generated id
    async fn create(&self, ctx: &OpContext, title: &str) -> DbResult<i64>;

    /// Insert all titles in one transaction; either every row is committed or none
    async fn create_many(&self, ctx: &OpContext, titles: &[String]) -> DbResult<()>;

    /// Every task ordered by ascending id
    async fn list_all(&self, ctx: &OpContext) -> DbResult<Vec<Task>>;

    /// Tasks whose `done` flag equals `done`, ordered by ascending id
    async fn list_by_done(&self, ctx: &OpContext, done: bool) -> DbResult<Vec<Task>>;

    /// The task with the given id, or `DatabaseError::NotFound`
    async fn find_by_id(&self, ctx: &OpContext, id: i64) -> DbResult<Task>;

    /// Number of rows in the table
    async fn count(&self, ctx: &OpContext) -> DbResult<i64>;
}

/// SQLite-backed task repository
///
/// Holds a shared handle to an externally owned connection pool and no
/// other state.
#[derive(Clone, Debug)]
pub struct TaskRepository {
    db: Arc<DatabaseConnection>,
}

impl TaskRepository {
    /// Create a new task repository bound to `db`
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// The connection this repository is bound to
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn insert_titles(conn: &mut SqliteConnection, titles: &[String]) -> DbResult<()> {
        let statement = (&mut *conn).prepare(INSERT_TASK).await?;

        for title in titles {
            statement
                .query()
                .bind(title.as_str())
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    async fn fetch_tasks(&self, done: Option<bool>) -> DbResult<Vec<Task>> {
        let rows = match done {
            Some(done) => {
                sqlx::query(SELECT_TASKS_BY_DONE)
                    .bind(done)
                    .fetch_all(self.db.pool())
                    .await?
            }
            None => {
                sqlx::query(SELECT_ALL_TASKS)
                    .fetch_all(self.db.pool())
                    .await?
            }
        };

        rows.iter().map(task_from_row).collect()
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn create(&self, ctx: &OpContext, title: &str) -> DbResult<i64> {
        let id = ctx
            .run(async {
                let id: i64 = sqlx::query_scalar(INSERT_TASK_RETURNING_ID)
                    .bind(title)
                    .fetch_one(self.db.pool())
                    .await?;
                Ok::<_, DatabaseError>(id)
            })
            .await?;

        debug!(task_id = id, "Created task");
        Ok(id)
    }

    async fn create_many(&self, ctx: &OpContext, titles: &[String]) -> DbResult<()> {
        if titles.is_empty() {
            return Ok(());
        }

        ctx.run(async {
            let mut tx = self.db.pool().begin().await?;

            match Self::insert_titles(&mut *tx, titles).await {
                Ok(()) => tx.commit().await?,
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        warn!(error = %rollback_err, "Rollback of task batch failed");
                    }
                    return Err(err);
                }
            }

            Ok::<_, DatabaseError>(())
        })
        .await?;

        debug!(count = titles.len(), "Created task batch");
        Ok(())
    }

    async fn list_all(&self, ctx: &OpContext) -> DbResult<Vec<Task>> {
        ctx.run(self.fetch_tasks(None)).await
    }

    async fn list_by_done(&self, ctx: &OpContext, done: bool) -> DbResult<Vec<Task>> {
        ctx.run(self.fetch_tasks(Some(done))).await
    }

    async fn find_by_id(&self, ctx: &OpContext, id: i64) -> DbResult<Task> {
        ctx.run(async {
            let row = sqlx::query(SELECT_TASK_BY_ID)
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?
                .ok_or_else(|| {
                    DatabaseError::not_found(format!("task with id {} not found", id))
                })?;

            task_from_row(&row)
        })
        .await
    }

    async fn count(&self, ctx: &OpContext) -> DbResult<i64> {
        ctx.run(async {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
                .fetch_one(self.db.pool())
                .await?;
            Ok::<_, DatabaseError>(count)
        })
        .await
    }
}

/// Decode one `tasks` row field by field
fn task_from_row(row: &SqliteRow) -> DbResult<Task> {
    let created_at_text: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_text)
        .map_err(|e| {
            DatabaseError::row_mapping(format!(
                "invalid created_at value `{}`: {}",
                created_at_text, e
            ))
        })?
        .with_timezone(&Utc);

    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        done: row.try_get("done")?,
        created_at,
    })
}
