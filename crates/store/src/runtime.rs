//! Store runtime integration.
//!
//! Bridges the synchronous terminal loop with the async store.

use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tracing::warn;

use cricket_scorer_core::Match;

use crate::error::StoreError;
use crate::MatchStore;

/// Result of a background save, delivered back to the loop.
#[derive(Debug)]
pub struct SaveOutcome {
    pub match_id: String,
    pub result: Result<(), StoreError>,
}

/// Owns a small tokio runtime for store I/O.
pub struct StoreRuntime {
    rt: Runtime,
    outcome_tx: mpsc::UnboundedSender<SaveOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SaveOutcome>,
    pending: usize,
}

impl StoreRuntime {
    pub fn new() -> io::Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("cricket-store")
            .enable_all()
            .build()?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            outcome_tx,
            outcome_rx,
            pending: 0,
        })
    }

    /// Run a store future to completion on the calling thread.
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.rt.block_on(fut)
    }

    /// Save a snapshot without blocking the caller. The outcome arrives via
    /// [`try_recv`](Self::try_recv) or [`wait`](Self::wait).
    pub fn save_in_background<S: MatchStore>(&mut self, store: Arc<S>, snapshot: Match) {
        let tx = self.outcome_tx.clone();
        self.pending += 1;
        self.rt.spawn(async move {
            let result = store.save(&snapshot).await;
            if let Err(e) = &result {
                warn!(match_id = %snapshot.id, error = %e, "background save failed");
            }
            let _ = tx.send(SaveOutcome {
                match_id: snapshot.id,
                result,
            });
        });
    }

    /// Saves spawned but not yet collected.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn try_recv(&mut self) -> Option<SaveOutcome> {
        let outcome = self.outcome_rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(outcome)
    }

    /// Block until the next outcome. Returns None with nothing pending.
    pub fn wait(&mut self) -> Option<SaveOutcome> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.rt.block_on(self.outcome_rx.recv())?;
        self.pending -= 1;
        Some(outcome)
    }
}
