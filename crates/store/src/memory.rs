use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use cricket_scorer_core::Match;

use crate::error::{validate_id, Result};
use crate::{sort_newest_first, MatchStore};

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    matches: RwLock<HashMap<String, Match>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.matches.read().await.is_empty()
    }
}

impl MatchStore for MemoryStore {
    async fn save(&self, m: &Match) -> Result<()> {
        validate_id(&m.id)?;
        self.matches.write().await.insert(m.id.clone(), m.clone());
        debug!(match_id = %m.id, "match saved in memory");
        Ok(())
    }

    async fn list_matches(&self) -> Result<Vec<Match>> {
        let mut all: Vec<Match> = self.matches.read().await.values().cloned().collect();
        sort_newest_first(&mut all);
        Ok(all)
    }

    async fn get(&self, id: &str) -> Result<Option<Match>> {
        validate_id(id)?;
        Ok(self.matches.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        validate_id(id)?;
        self.matches.write().await.remove(id);
        Ok(())
    }
}
