//! The fixed demonstration sequence
//!
//! Batch insert, full scan, filtered scan and lookup by id, each under its
//! own bounded-time context. The first failing step ends the run.

use crate::config::TimeoutConfig;
use crate::context::OpContext;
use crate::db::error::DatabaseError;
use crate::db::models::Task;
use crate::db::repositories::TaskStore;
use crate::output::{write_task_detail, write_task_list};
use std::fmt;
use std::io::Write;
use thiserror::Error;
use tracing::info;

/// Titles inserted by the demo batch
pub const DEMO_TITLES: [&str; 5] = [
    "Finish practical assignment #5",
    "Buy coffee",
    "Review reports",
    "Learn Rust",
    "Write documentation",
];

/// The steps of the demo, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoStep {
    CreateMany,
    ListTasks,
    ListDone,
    FindById,
}

impl fmt::Display for DemoStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoStep::CreateMany => write!(f, "CreateMany"),
            DemoStep::ListTasks => write!(f, "ListTasks"),
            DemoStep::ListDone => write!(f, "ListDone"),
            DemoStep::FindById => write!(f, "FindById"),
        }
    }
}

/// Errors that end the demo
#[derive(Debug, Error)]
pub enum DemoError {
    /// A store operation failed
    #[error("{step} error: {source}")]
    Step {
        step: DemoStep,
        #[source]
        source: DatabaseError,
    },

    /// Writing to the console failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl DemoError {
    /// The step that failed, if the failure came from the store
    pub fn step(&self) -> Option<DemoStep> {
        match self {
            DemoError::Step { step, .. } => Some(*step),
            DemoError::Output(_) => None,
        }
    }
}

/// What a completed run observed
#[derive(Debug, Clone, Default)]
pub struct DemoReport {
    /// Number of titles inserted by the batch
    pub inserted: usize,
    /// Every task after the batch
    pub tasks: Vec<Task>,
    /// Tasks with `done = true`
    pub done_tasks: Vec<Task>,
    /// The task looked up by id; None when the table was empty
    pub found: Option<Task>,
}

fn step_failed(step: DemoStep) -> impl FnOnce(DatabaseError) -> DemoError {
    move |source| DemoError::Step { step, source }
}

/// Run the demo sequence against `store`, printing results to `out`
pub async fn run_demo<S, W>(
    store: &S,
    timeouts: &TimeoutConfig,
    out: &mut W,
) -> Result<DemoReport, DemoError>
where
    S: TaskStore + ?Sized,
    W: Write,
{
    let titles: Vec<String> = DEMO_TITLES.iter().map(|t| t.to_string()).collect();

    let ctx = OpContext::with_timeout(timeouts.create());
    store
        .create_many(&ctx, &titles)
        .await
        .map_err(step_failed(DemoStep::CreateMany))?;
    info!(count = titles.len(), "Inserted {} tasks", titles.len());

    let ctx = OpContext::with_timeout(timeouts.read());
    let tasks = store
        .list_all(&ctx)
        .await
        .map_err(step_failed(DemoStep::ListTasks))?;
    write_task_list(out, "Tasks", &tasks)?;

    let ctx = OpContext::with_timeout(timeouts.read());
    let done_tasks = store
        .list_by_done(&ctx, true)
        .await
        .map_err(step_failed(DemoStep::ListDone))?;
    writeln!(out)?;
    write_task_list(out, "Done Tasks List", &done_tasks)?;

    let found = match tasks.first() {
        Some(first) => {
            let ctx = OpContext::with_timeout(timeouts.read());
            let task = store
                .find_by_id(&ctx, first.id)
                .await
                .map_err(step_failed(DemoStep::FindById))?;
            writeln!(out)?;
            write_task_detail(out, "Task by ID", &task)?;
            Some(task)
        }
        None => None,
    };

    Ok(DemoReport {
        inserted: titles.len(),
        tasks,
        done_tasks,
        found,
    })
}
