use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use taskstore::config::TimeoutConfig;
use taskstore::demo::DEMO_TITLES;
use taskstore::{
    run_demo, DatabaseConnection, DatabaseError, DbResult, DemoStep, OpContext, Task,
    TaskRepository, TaskStore,
};

/// In-memory store that can be told to fail one step
#[derive(Default)]
struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    fail_on: Option<DemoStep>,
    calls: AtomicUsize,
}

impl MemoryStore {
    fn failing_on(step: DemoStep) -> Self {
        Self {
            fail_on: Some(step),
            ..Self::default()
        }
    }

    fn check(&self, step: DemoStep) -> DbResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(step) {
            return Err(DatabaseError::ConnectionError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(&self, _ctx: &OpContext, title: &str) -> DbResult<i64> {
        let mut tasks = self.tasks.lock().unwrap();
        let id = tasks.len() as i64 + 1;
        tasks.push(Task {
            id,
            title: title.to_string(),
            done: false,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn create_many(&self, ctx: &OpContext, titles: &[String]) -> DbResult<()> {
        self.check(DemoStep::CreateMany)?;
        for title in titles {
            self.create(ctx, title).await?;
        }
        Ok(())
    }

    async fn list_all(&self, _ctx: &OpContext) -> DbResult<Vec<Task>> {
        self.check(DemoStep::ListTasks)?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn list_by_done(&self, _ctx: &OpContext, done: bool) -> DbResult<Vec<Task>> {
        self.check(DemoStep::ListDone)?;
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.done == done)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, _ctx: &OpContext, id: i64) -> DbResult<Task> {
        self.check(DemoStep::FindById)?;
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("task with id {} not found", id)))
    }

    async fn count(&self, _ctx: &OpContext) -> DbResult<i64> {
        Ok(self.tasks.lock().unwrap().len() as i64)
    }
}

#[tokio::test]
async fn test_demo_prints_all_sections() {
    let store = MemoryStore::default();
    let mut out = Vec::new();

    let report = run_demo(&store, &TimeoutConfig::default(), &mut out)
        .await
        .unwrap();

    assert_eq!(report.inserted, DEMO_TITLES.len());
    assert_eq!(report.tasks.len(), DEMO_TITLES.len());
    assert!(report.done_tasks.is_empty());
    assert_eq!(report.found.as_ref().map(|t| t.id), Some(report.tasks[0].id));

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("=== Tasks ===\n"));
    assert!(text.contains("\n=== Done Tasks List ===\n"));
    assert!(text.contains("\n=== Task by ID ===\nID: 1\n"));
    for title in DEMO_TITLES {
        assert!(text.contains(title));
    }
}

#[tokio::test]
async fn test_demo_halts_on_first_failure() {
    let store = MemoryStore::failing_on(DemoStep::ListTasks);
    let mut out = Vec::new();

    let err = run_demo(&store, &TimeoutConfig::default(), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(DemoStep::ListTasks));
    assert!(err.to_string().starts_with("ListTasks error:"));
    // create_many and list_all only
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_demo_reports_lookup_failure() {
    let store = MemoryStore::failing_on(DemoStep::FindById);
    let mut out = Vec::new();

    let err = run_demo(&store, &TimeoutConfig::default(), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(DemoStep::FindById));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("=== Done Tasks List ==="));
    assert!(!text.contains("=== Task by ID ==="));
}

#[tokio::test]
async fn test_demo_against_sqlite() {
    let db = Arc::new(DatabaseConnection::open("sqlite::memory:").await.unwrap());
    let repo = TaskRepository::new(db.clone());
    let mut out = Vec::new();

    let report = run_demo(&repo, &TimeoutConfig::default(), &mut out)
        .await
        .unwrap();
    db.close().await;

    let titles: Vec<&str> = report.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, DEMO_TITLES.to_vec());
    assert!(report.tasks.iter().all(|t| !t.done));
    assert_eq!(report.found.unwrap().title, DEMO_TITLES[0]);
}

#[tokio::test]
async fn test_demo_timeout_is_reported_as_step_error() {
    let db = Arc::new(DatabaseConnection::open("sqlite::memory:").await.unwrap());
    let repo = TaskRepository::new(db.clone());
    let timeouts = TimeoutConfig {
        create_ms: 0,
        read_ms: 3_000,
    };
    let mut out = Vec::new();

    let err = run_demo(&repo, &timeouts, &mut out).await.unwrap_err();

    assert_eq!(err.step(), Some(DemoStep::CreateMany));
    assert!(err.to_string().contains("timed out"));
}
