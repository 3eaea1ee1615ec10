//! The caller side of the engine: one current match, one action at a time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use cricket_scorer_core::types::ScoringAction;
use cricket_scorer_core::{Match, ScoringEngine, ScoringRules};

use crate::error::Result;
use crate::MatchStore;

/// Result of routing one action through [`MatchSession::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The snapshot after the action.
    pub snapshot: Match,
    /// False when the action was refused or had nothing to act on.
    pub changed: bool,
    pub innings_over: bool,
}

/// Owns the current snapshot and a cached listing of stored matches.
///
/// Mutating methods take `&mut self`, so only one action is ever in flight.
/// Snapshots are persisted on explicit save and on completion, not after
/// every ball.
pub struct MatchSession<S> {
    store: Arc<S>,
    engine: ScoringEngine,
    current: Option<Match>,
    matches: Vec<Match>,
}

impl<S: MatchStore> MatchSession<S> {
    pub fn new(store: Arc<S>, rules: ScoringRules) -> Self {
        Self {
            store,
            engine: ScoringEngine::new(rules),
            current: None,
            matches: Vec::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    /// Stored matches as of the last load, save or delete, newest first.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Completed matches, newest first.
    pub fn history(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_completed)
    }

    /// Refresh the listing and resume the newest incomplete match, if any.
    pub async fn load(&mut self) -> Result<Option<&Match>> {
        self.refresh().await?;
        self.current = self.matches.iter().find(|m| !m.is_completed).cloned();
        if let Some(m) = &self.current {
            info!(match_id = %m.id, balls = m.balls, "resuming match");
        }
        Ok(self.current.as_ref())
    }

    /// Start a fresh innings, persist it and make it current.
    pub async fn create_new_match(&mut self, team_name: &str, max_overs: u32) -> Result<&Match> {
        self.create_new_match_at(team_name, max_overs, Utc::now())
            .await
    }

    /// [`create_new_match`](Self::create_new_match) with an explicit clock.
    pub async fn create_new_match_at(
        &mut self,
        team_name: &str,
        max_overs: u32,
        created_at: DateTime<Utc>,
    ) -> Result<&Match> {
        let mut millis = created_at.timestamp_millis();
        while self.matches.iter().any(|m| m.id == format!("match_{millis}")) {
            millis += 1;
        }
        let m = Match::new(format!("match_{millis}"), team_name, max_overs, created_at);

        self.store.save(&m).await?;
        info!(match_id = %m.id, team = %m.team_name, max_overs = m.max_overs, "match created");
        self.refresh().await?;
        Ok(&*self.current.insert(m))
    }

    /// Route one action to the engine.
    ///
    /// Returns `None` without a current match. Once the innings is over only
    /// `Undo` is accepted.
    pub fn apply(&mut self, action: ScoringAction) -> Option<ApplyOutcome> {
        let m = self.current.as_mut()?;

        let changed = if m.is_innings_over() && !action.is_undo() {
            debug!(match_id = %m.id, %action, "innings over, action refused");
            false
        } else {
            self.engine.apply_in_place(m, action)
        };

        Some(ApplyOutcome {
            snapshot: m.clone(),
            changed,
            innings_over: m.is_innings_over(),
        })
    }

    /// Persist the current snapshot. Returns false with nothing to save.
    pub async fn save_current(&mut self) -> Result<bool> {
        let Some(m) = &self.current else {
            return Ok(false);
        };
        self.store.save(m).await?;
        self.refresh().await?;
        Ok(true)
    }

    /// Mark the current match complete, persist it and clear it.
    ///
    /// On a failed save the match stays current and incomplete.
    pub async fn complete_current(&mut self) -> Result<Option<Match>> {
        self.complete_current_at(Utc::now()).await
    }

    pub async fn complete_current_at(&mut self, at: DateTime<Utc>) -> Result<Option<Match>> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let mut done = current.clone();
        done.complete(at);

        self.store.save(&done).await?;
        info!(
            match_id = %done.id,
            total_runs = done.total_runs,
            wickets = done.wickets,
            overs = %done.overs_display(),
            "match completed"
        );
        self.current = None;
        self.refresh().await?;
        Ok(Some(done))
    }

    /// Delete a stored match, clearing it if it is the current one.
    pub async fn delete_match(&mut self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        if self.current.as_ref().is_some_and(|m| m.id == id) {
            self.current = None;
        }
        self.refresh().await
    }

    async fn refresh(&mut self) -> Result<()> {
        self.matches = self.store.list_matches().await?;
        Ok(())
    }
}
