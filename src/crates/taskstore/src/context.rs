//! Bounded-time, cancellable operation contexts
//!
//! Every repository call takes an [`OpContext`]. The context carries an
//! optional deadline and a cancellation flag shared by all of its clones;
//! [`OpContext::run`] races the store call against both and drops the
//! in-flight future when either fires.

use crate::db::error::{DatabaseError, DbResult};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::debug;

/// Deadline and cancellation state for one logical operation
#[derive(Clone)]
pub struct OpContext {
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    cancelled: Arc<AtomicBool>,
    cancel_notify: Arc<Notify>,
}

impl std::fmt::Debug for OpContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpContext")
            .field("timeout", &self.timeout)
            .field("remaining", &self.remaining())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl OpContext {
    /// A context with no deadline; it only ends if `cancel()` is called
    pub fn background() -> Self {
        Self {
            deadline: None,
            timeout: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            cancel_notify: Arc::new(Notify::new()),
        }
    }

    /// A context whose deadline is `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            timeout: Some(timeout),
            ..Self::background()
        }
    }

    /// Cancel this context and every clone of it
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Operation context cancelled");
            self.cancel_notify.notify_waiters();
        }
    }

    /// Check if the context has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Check if the deadline has passed
    pub fn is_expired(&self) -> bool {
        self.deadline
            .map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// Time left until the deadline
    ///
    /// Returns None when there is no deadline, `Duration::ZERO` once it has
    /// passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// The timeout this context was created with
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn check(&self) -> DbResult<()> {
        if self.is_cancelled() {
            return Err(DatabaseError::Cancelled);
        }
        if self.is_expired() {
            return Err(DatabaseError::Timeout(self.timeout.unwrap_or_default()));
        }
        Ok(())
    }

    /// Drive `operation` until it finishes, the deadline passes or the
    /// context is cancelled
    ///
    /// A context that is already done fails without polling `operation`.
    /// When the context wins the race the operation future is dropped, which
    /// returns its connection to the pool and rolls back any transaction it
    /// still holds.
    pub async fn run<F, T>(&self, operation: F) -> DbResult<T>
    where
        F: Future<Output = DbResult<T>>,
    {
        let notified = self.cancel_notify.notified();
        tokio::pin!(notified);
        // Register for notify_waiters before re-checking the flag.
        notified.as_mut().enable();

        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = &mut notified => Err(DatabaseError::Cancelled),
            _ = deadline => Err(DatabaseError::Timeout(self.timeout.unwrap_or_default())),
            result = operation => result,
        }
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::background()
    }
}
