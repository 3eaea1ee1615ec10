//! Persistence for scored matches
//!
//! The scoring core never touches storage. This crate supplies the
//! collaborator that does:
//!
//! - [`MatchStore`]: async save / list / get / delete over whole snapshots
//! - [`JsonFileStore`]: one pretty-printed `<id>.json` per match
//! - [`MemoryStore`]: process-local store for tests and throwaway sessions
//! - [`MatchSession`]: owns the single current snapshot and routes actions
//!   through the engine
//! - [`StoreRuntime`]: lets a synchronous loop drive the async store
//! - [`ScorerConfig`]: environment-driven settings
//!
//! Stored records are decoded leniently (see
//! [`cricket_scorer_core::normalize`]), so `0`/`1` and `"true"` booleans and
//! numeric strings from older writers load without complaint.

use std::future::Future;

use cricket_scorer_core::Match;

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod runtime;
pub mod session;

pub use config::ScorerConfig;
pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use runtime::{SaveOutcome, StoreRuntime};
pub use session::{ApplyOutcome, MatchSession};

/// Whole-snapshot persistence. Implementations are shared across tasks, so
/// every future they return is `Send`.
pub trait MatchStore: Send + Sync + 'static {
    /// Insert or replace the record for `m.id`.
    fn save(&self, m: &Match) -> impl Future<Output = Result<()>> + Send;

    /// Every stored match, newest `created_at` first.
    fn list_matches(&self) -> impl Future<Output = Result<Vec<Match>>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Match>>> + Send;

    /// Remove a match. Deleting an unknown id is not an error.
    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Newest first; ties broken by id so listings are stable.
pub(crate) fn sort_newest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
