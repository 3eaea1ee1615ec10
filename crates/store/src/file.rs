//! JSON file store - one document per match in a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use cricket_scorer_core::{match_from_str, Match};

use crate::error::{validate_id, Result};
use crate::{sort_newest_first, MatchStore};

const EXTENSION: &str = "json";

/// Stores each match as `<dir>/<id>.json`.
///
/// Writes go to a hidden temp file first and are renamed into place, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.{EXTENSION}")))
    }

    async fn read_record(path: &Path) -> Result<Match> {
        let text = fs::read_to_string(path).await?;
        Ok(match_from_str(&text)?)
    }
}

impl MatchStore for JsonFileStore {
    async fn save(&self, m: &Match) -> Result<()> {
        let path = self.path_for(&m.id)?;
        let tmp = self.dir.join(format!(".{}.{EXTENSION}.tmp", m.id));
        let body = serde_json::to_vec_pretty(m)?;

        fs::create_dir_all(&self.dir).await?;
        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &path).await?;

        debug!(match_id = %m.id, path = %path.display(), bytes = body.len(), "match saved");
        Ok(())
    }

    async fn list_matches(&self) -> Result<Vec<Match>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut matches = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_record = path.extension().is_some_and(|ext| ext == EXTENSION)
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_record {
                continue;
            }
            match Self::read_record(&path).await {
                Ok(m) => matches.push(m),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable match record");
                    return Err(e);
                }
            }
        }

        sort_newest_first(&mut matches);
        Ok(matches)
    }

    async fn get(&self, id: &str) -> Result<Option<Match>> {
        let path = self.path_for(id)?;
        match Self::read_record(&path).await {
            Ok(m) => Ok(Some(m)),
            Err(crate::StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(match_id = %id, "match deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use chrono::{TimeZone, Utc};
    use cricket_scorer_core::apply_action;
    use cricket_scorer_core::types::ScoringAction;
    use tempfile::TempDir;

    fn match_at(id: &str, hour: u32) -> Match {
        Match::new(id, "Falcons", 20, Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn saved_match_reads_back_identical() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("matches"));

        let mut m = match_at("m1", 9);
        for action in [
            ScoringAction::Run { value: 4 },
            ScoringAction::Wide,
            ScoringAction::Wicket,
            ScoringAction::NoBall { off_bat_runs: 2 },
            ScoringAction::LegalVariant { off_bat_runs: 1 },
        ] {
            m = apply_action(&m, action);
        }
        store.save(&m).await.unwrap();

        assert!(store.dir().join("m1.json").exists());
        assert_eq!(store.get("m1").await.unwrap(), Some(m));
    }

    #[tokio::test]
    async fn missing_directory_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent"));
        assert!(store.list_matches().await.unwrap().is_empty());
        assert!(store.get("m1").await.unwrap().is_none());
        store.delete("m1").await.unwrap();
    }

    #[tokio::test]
    async fn list_skips_foreign_files_and_sorts() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(&match_at("old", 8)).await.unwrap();
        store.save(&match_at("new", 12)).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a match").unwrap();
        std::fs::write(dir.path().join(".new.json.tmp"), "{").unwrap();

        let ids: Vec<_> = store
            .list_matches()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[tokio::test]
    async fn corrupt_record_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        assert!(matches!(store.get("bad").await, Err(StoreError::Json(_))));
        assert!(matches!(store.list_matches().await, Err(StoreError::Json(_))));
    }

    #[tokio::test]
    async fn lenient_legacy_record_loads() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let legacy = r#"{
            "id": "legacy",
            "teamName": "Falcons",
            "maxOvers": "10",
            "totalRuns": "7",
            "wickets": 0,
            "overs": 0,
            "balls": "2",
            "extras": 1,
            "players": [],
            "oversList": [],
            "currentStrikerId": "",
            "currentNonStrikerId": "",
            "currentBowlerId": "",
            "isCompleted": 0,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        std::fs::write(dir.path().join("legacy.json"), legacy).unwrap();

        let m = store.get("legacy").await.unwrap().unwrap();
        assert_eq!((m.max_overs, m.total_runs, m.balls), (10, 7, 2));
        assert!(!m.is_completed);
    }

    #[tokio::test]
    async fn rejects_ids_that_escape_the_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let m = match_at("../escape", 9);
        assert!(matches!(store.save(&m).await, Err(StoreError::InvalidId(_))));
        assert!(matches!(store.delete("a/b").await, Err(StoreError::InvalidId(_))));
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(&match_at("m1", 9)).await.unwrap();
        store.delete("m1").await.unwrap();
        assert!(!dir.path().join("m1.json").exists());
    }
}
