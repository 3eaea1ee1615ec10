//! Environment-driven configuration.

use std::path::PathBuf;

use cricket_scorer_core::types::DEFAULT_MAX_OVERS;
use cricket_scorer_core::ScoringRules;

/// Settings for a scoring session.
///
/// | Variable | Default |
/// |---|---|
/// | `CRICKET_DATA_DIR` | `./matches` |
/// | `CRICKET_TEAM_NAME` | `Local Team` |
/// | `CRICKET_MAX_OVERS` | `20` |
/// | `CRICKET_WICKET_CAP` | unset (no cap) |
/// | `CRICKET_LEGACY_UNDO` | unset |
/// | `CRICKET_LOG_PATH` | unset (no log file) |
/// | `CRICKET_LOG` | `warn` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerConfig {
    pub data_dir: PathBuf,
    pub team_name: String,
    pub max_overs: u32,
    pub wicket_cap: Option<u32>,
    pub legacy_undo: bool,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./matches"),
            team_name: "Local Team".to_string(),
            max_overs: DEFAULT_MAX_OVERS,
            wicket_cap: None,
            legacy_undo: false,
            log_path: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl ScorerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset and
    /// unparseable numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let max_overs = get("CRICKET_MAX_OVERS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_overs);

        let legacy_undo = get("CRICKET_LEGACY_UNDO")
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            data_dir: get("CRICKET_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            team_name: get("CRICKET_TEAM_NAME").unwrap_or(defaults.team_name),
            max_overs,
            wicket_cap: get("CRICKET_WICKET_CAP").and_then(|s| s.parse().ok()),
            legacy_undo,
            log_path: get("CRICKET_LOG_PATH").map(PathBuf::from),
            log_filter: get("CRICKET_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn rules(&self) -> ScoringRules {
        let base = if self.legacy_undo {
            ScoringRules::legacy()
        } else {
            ScoringRules::default()
        };
        base.with_max_wickets(self.wicket_cap)
    }
}
