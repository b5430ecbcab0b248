//! Action scheduler module
//!
//! Runs heterogeneous action batches either concurrently or strictly in
//! order. Every batch is bracketed by a defensive key release before and
//! after, and a failing action never aborts its siblings or the batch.

use crate::actions::executor::ActionExecutor;
use crate::actions::types::{ActionOutcome, BatchStatus, RawAction};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Action scheduler
///
/// Only one batch may be in flight at a time; overlapping callers queue on an
/// internal guard so key-release brackets never interleave.
pub struct ActionScheduler {
    executor: Arc<ActionExecutor>,
    batch_guard: Mutex<()>,
}

impl ActionScheduler {
    /// Create a new action scheduler
    pub fn new(executor: Arc<ActionExecutor>) -> Self {
        Self {
            executor,
            batch_guard: Mutex::new(()),
        }
    }

    /// Execute a batch concurrently
    ///
    /// Each recognized action becomes an independent task; all tasks are
    /// awaited to completion and their failures collected without canceling
    /// siblings. The returned outcomes cover every submitted action and the
    /// call itself never fails.
    #[instrument(skip(self, actions))]
    pub async fn execute_batch(&self, actions: Vec<RawAction>) -> Vec<ActionOutcome> {
        if actions.is_empty() {
            debug!("No actions to execute");
            return Vec::new();
        }

        let _guard = self.batch_guard.lock().await;

        debug!("Executing {} action(s) in parallel", actions.len());
        self.release_keys_checked().await;

        let default_tap = self.executor.tuning().key_tap_seconds;
        let mut outcomes = Vec::new();
        let mut tasks = Vec::new();

        for (index, raw) in actions.iter().enumerate() {
            match raw.normalize(default_tap) {
                Ok(action) => {
                    debug!(
                        "[{}/{}] {}: {}",
                        index + 1,
                        actions.len(),
                        action.kind(),
                        raw.reason.as_deref().unwrap_or("")
                    );
                    let executor = self.executor.clone();
                    let handle =
                        tokio::spawn(async move { executor.dispatch(&action).await });
                    tasks.push((index, handle));
                }
                Err(reason) => {
                    warn!("Skipping action {}: {}", index + 1, reason);
                    outcomes.push(ActionOutcome {
                        index,
                        status: BatchStatus::Skipped(reason),
                    });
                }
            }
        }

        debug!("Waiting for all actions to complete");
        let joined = join_all(
            tasks
                .into_iter()
                .map(|(index, handle)| async move { (index, handle.await) }),
        )
        .await;

        for (index, result) in joined {
            let status = match result {
                Ok(Ok(())) => BatchStatus::Completed,
                Ok(Err(e)) => {
                    warn!("Action {} failed: {}", index + 1, e);
                    BatchStatus::Failed(e.to_string())
                }
                Err(e) => {
                    warn!("Action {} task aborted: {}", index + 1, e);
                    BatchStatus::Failed(e.to_string())
                }
            };
            outcomes.push(ActionOutcome { index, status });
        }

        outcomes.sort_by_key(|outcome| outcome.index);

        self.release_keys_checked().await;
        debug!("Batch completed");

        outcomes
    }

    /// Execute a batch strictly in list order
    ///
    /// A failing action is logged and the remaining sequence continues; the
    /// call itself never fails.
    #[instrument(skip(self, actions))]
    pub async fn execute_batch_ordered(&self, actions: Vec<RawAction>) -> Vec<ActionOutcome> {
        if actions.is_empty() {
            return Vec::new();
        }

        let _guard = self.batch_guard.lock().await;

        debug!("Executing {} action(s) sequentially", actions.len());
        self.release_keys_checked().await;

        let default_tap = self.executor.tuning().key_tap_seconds;
        let mut outcomes = Vec::new();

        for (index, raw) in actions.iter().enumerate() {
            let status = match raw.normalize(default_tap) {
                Ok(action) => {
                    debug!(
                        "[{}/{}] {}: {}",
                        index + 1,
                        actions.len(),
                        action.kind(),
                        raw.reason.as_deref().unwrap_or("")
                    );
                    match self.executor.dispatch(&action).await {
                        Ok(()) => BatchStatus::Completed,
                        Err(e) => {
                            warn!("Action {} failed: {}", index + 1, e);
                            BatchStatus::Failed(e.to_string())
                        }
                    }
                }
                Err(reason) => {
                    warn!("Skipping action {}: {}", index + 1, reason);
                    BatchStatus::Skipped(reason)
                }
            };

            outcomes.push(ActionOutcome { index, status });
        }

        self.release_keys_checked().await;
        debug!("Ordered batch completed");

        outcomes
    }

    /// Release the reset keys, logging instead of propagating failures
    ///
    /// The release bracket must run even when the driver is unhealthy; a
    /// failed release never takes down the batch.
    async fn release_keys_checked(&self) {
        debug!("Releasing all keys");
        if let Err(e) = self.executor.release_all_keys().await {
            warn!("Key release failed: {}", e);
        }
    }
}
