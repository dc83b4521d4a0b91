//! Bounded, cancellable fan-out of async tasks.
//!
//! `FanOut::run` spawns one task per input future and waits for all of them
//! (join-all semantics), returning outputs in input order no matter which
//! task finished first. A semaphore caps how many tasks run at once, and a
//! cancellation token aborts the whole batch.
//!
//! ## Learning Goals
//! - `JoinSet` for owning a dynamic set of spawned tasks
//! - `Semaphore::acquire_owned` to move permits into `'static` tasks
//! - `tokio::select!` to race work against a `CancellationToken`

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Result, SourceError};

/// Default cap on concurrently running tasks
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Worker-pool style runner shared by every stage of a load.
///
/// Cloning is cheap; clones share the same semaphore and token.
#[derive(Clone, Debug)]
pub struct FanOut {
    limiter: Arc<Semaphore>,
    cancel: CancellationToken,
    max_concurrency: usize,
}

impl FanOut {
    /// Create a runner with its own cancellation token.
    ///
    /// A cap of zero is bumped to one so the batch can make progress.
    pub fn new(max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            limiter: Arc::new(Semaphore::new(max_concurrency)),
            cancel: CancellationToken::new(),
            max_concurrency,
        }
    }

    /// Tie this runner to an externally owned token (builder pattern)
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Await a single future unless the token fires first.
    pub async fn guard<F: Future>(&self, future: F) -> Result<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SourceError::Cancelled),
            output = future => Ok(output),
        }
    }

    /// Run every task, at most `max_concurrency` at a time.
    ///
    /// ## Algorithm
    /// 1. Spawn each task tagged with its input slot; the task waits for a
    ///    permit before polling the inner future
    /// 2. Drain the JoinSet, racing each join against cancellation
    /// 3. Put outputs back into input order
    ///
    /// On cancellation the remaining tasks are aborted and their results are
    /// discarded.
    pub async fn run<T, F>(&self, tasks: Vec<F>) -> Result<Vec<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        let total = tasks.len();
        let mut set = JoinSet::new();
        for (slot, task) in tasks.into_iter().enumerate() {
            let limiter = Arc::clone(&self.limiter);
            set.spawn(async move {
                let _permit = limiter.acquire_owned().await;
                (slot, task.await)
            });
        }
        debug!(
            "Spawned {} tasks (max concurrency: {})",
            total, self.max_concurrency
        );

        let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    set.abort_all();
                    debug!("Fan-out cancelled with {} tasks outstanding", set.len());
                    return Err(SourceError::Cancelled);
                }
                joined = set.join_next() => match joined {
                    Some(Ok((slot, output))) => slots[slot] = Some(output),
                    Some(Err(err)) => return Err(SourceError::Task(err)),
                    None => break,
                },
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY)
    }
}
