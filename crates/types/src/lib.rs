//! Core types module - shared data structures and constants
//!
//! This crate defines the vocabulary shared by the scoring engine, the
//! persistence layer and the terminal front end. Nothing in here performs I/O.
//!
//! # Innings Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BALLS_PER_OVER` | 6 | Legal deliveries in one over |
//! | `MAX_WICKETS` | 10 | Wickets that end an innings |
//! | `SQUAD_BATSMEN` | 11 | Batsmen seeded into a new match |
//! | `SQUAD_BOWLERS` | 5 | Bowlers seeded into a new match |
//! | `DEFAULT_MAX_OVERS` | 20 | Overs limit when none is chosen |
//!
//! # Examples
//!
//! ```
//! use cricket_scorer_types::{ScoringAction, BALLS_PER_OVER};
//!
//! assert_eq!(ScoringAction::from_str("4"), Some(ScoringAction::Run { value: 4 }));
//! assert_eq!(ScoringAction::from_str("nb:2"), Some(ScoringAction::NoBall { off_bat_runs: 2 }));
//! assert!(ScoringAction::Wide.is_extra());
//! assert_eq!(BALLS_PER_OVER, 6);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Legal deliveries that make up one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Wickets that end an innings.
pub const MAX_WICKETS: u32 = 10;

/// Number of batsmen seeded into a new match.
pub const SQUAD_BATSMEN: usize = 11;

/// Number of bowlers seeded into a new match.
pub const SQUAD_BOWLERS: usize = 5;

/// Overs limit used when a match is created without one.
pub const DEFAULT_MAX_OVERS: u32 = 20;

/// Overs limits offered when creating a match.
pub const OVERS_PRESETS: [u32; 4] = [5, 10, 20, 50];

/// Largest value a `Run` action may carry.
pub const MAX_RUN_VALUE: u32 = 6;

/// Off-bat runs assumed for a no-ball when none are given.
pub const DEFAULT_NO_BALL_RUNS: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innings_defaults() {
        assert_eq!(BALLS_PER_OVER, 6);
        assert_eq!(MAX_WICKETS, 10);
        assert_eq!(SQUAD_BATSMEN, 11);
        assert_eq!(SQUAD_BOWLERS, 5);
        assert_eq!(DEFAULT_MAX_OVERS, 20);
        assert_eq!(DEFAULT_NO_BALL_RUNS, 1);
        assert!(OVERS_PRESETS.contains(&DEFAULT_MAX_OVERS));
    }

    #[test]
    fn parse_covers_every_kind() {
        assert_eq!(ScoringAction::from_str("1"), Some(ScoringAction::Run { value: 1 }));
        assert_eq!(ScoringAction::from_str("run:6"), Some(ScoringAction::Run { value: 6 }));
        assert_eq!(ScoringAction::from_str("run:7"), None);
        assert_eq!(ScoringAction::from_str("0"), Some(ScoringAction::Dot));
        assert_eq!(ScoringAction::from_str("DOT"), Some(ScoringAction::Dot));
        assert_eq!(ScoringAction::from_str("w"), Some(ScoringAction::Wicket));
        assert_eq!(ScoringAction::from_str("wd"), Some(ScoringAction::Wide));
        assert_eq!(
            ScoringAction::from_str("noball"),
            Some(ScoringAction::NoBall { off_bat_runs: 1 })
        );
        assert_eq!(
            ScoringAction::from_str("nb:0"),
            Some(ScoringAction::NoBall { off_bat_runs: 0 })
        );
        assert_eq!(
            ScoringAction::from_str("1b:3"),
            Some(ScoringAction::LegalVariant { off_bat_runs: 3 })
        );
        assert_eq!(ScoringAction::from_str("undo"), Some(ScoringAction::Undo));
        assert_eq!(ScoringAction::from_str("nb:x"), None);
        assert_eq!(ScoringAction::from_str("bogus"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let actions = [
            ScoringAction::Run { value: 3 },
            ScoringAction::Wicket,
            ScoringAction::Wide,
            ScoringAction::NoBall { off_bat_runs: 4 },
            ScoringAction::LegalVariant { off_bat_runs: 2 },
            ScoringAction::Dot,
            ScoringAction::Undo,
        ];
        for action in actions {
            assert_eq!(ScoringAction::from_str(&action.to_string()), Some(action));
        }
    }

    #[test]
    fn tagged_json_form() {
        let json = serde_json::to_string(&ScoringAction::NoBall { off_bat_runs: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"noBall","offBatRuns":2}"#);

        let parsed: ScoringAction = serde_json::from_str(r#"{"type":"noball"}"#).unwrap();
        assert_eq!(parsed, ScoringAction::NoBall { off_bat_runs: 1 });

        let parsed: ScoringAction =
            serde_json::from_str(r#"{"type":"1stbounce","offBatRuns":3}"#).unwrap();
        assert_eq!(parsed, ScoringAction::LegalVariant { off_bat_runs: 3 });

        let parsed: ScoringAction = serde_json::from_str(r#"{"type":"run","value":4}"#).unwrap();
        assert_eq!(parsed, ScoringAction::Run { value: 4 });

        let parsed: ScoringAction = serde_json::from_str(r#"{"type":"undo"}"#).unwrap();
        assert_eq!(parsed, ScoringAction::Undo);
    }

    #[test]
    fn tagged_run_outside_one_to_six_is_rejected() {
        for json in [
            r#"{"type":"run","value":0}"#,
            r#"{"type":"run","value":7}"#,
            r#"{"type":"run","value":9}"#,
        ] {
            let err = serde_json::from_str::<ScoringAction>(json).unwrap_err();
            assert!(err.to_string().contains("outside 1-6"), "{json}: {err}");
        }
        let parsed: ScoringAction = serde_json::from_str(r#"{"type":"run","value":6}"#).unwrap();
        assert_eq!(parsed, ScoringAction::Run { value: 6 });
    }

    #[test]
    fn ball_color_palette() {
        assert_eq!(BallColor::Variant.hex(), "#7c3aed");
        assert_eq!(BallColor::Six.rgb(), (0x10, 0xb9, 0x81));
        assert_eq!(BallColor::Extra.rgb(), (0xf5, 0x9e, 0x0b));
    }
}

/// Player role within the squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Batsman,
    Bowler,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::Batsman => "batsman",
            PlayerRole::Bowler => "bowler",
        }
    }
}

fn default_no_ball_runs() -> u32 {
    DEFAULT_NO_BALL_RUNS
}

/// Scoring actions the engine understands.
///
/// The set is closed: every handler matches it exhaustively, so a new
/// delivery kind cannot be added without touching the engine. The JSON form
/// is internally tagged (`{"type":"noBall","offBatRuns":2}`) and a `run`
/// outside 1-6 is rejected on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    try_from = "ActionRecord"
)]
pub enum ScoringAction {
    /// Runs off the bat from a legal delivery (1-6).
    Run { value: u32 },
    /// Striker dismissed on a legal delivery.
    Wicket,
    /// Wide: one-run extra, not a legal ball.
    Wide,
    /// No-ball: one-run extra plus any runs off the bat, not a legal ball.
    NoBall { off_bat_runs: u32 },
    /// Legal delivery scored off the bat with its own tag ("first bounce").
    LegalVariant { off_bat_runs: u32 },
    /// Legal delivery with no runs.
    Dot,
    /// Remove the most recently recorded delivery.
    Undo,
}

/// Unchecked tagged form, validated into a [`ScoringAction`].
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum ActionRecord {
    Run {
        value: u32,
    },
    Wicket,
    Wide,
    #[serde(alias = "noball")]
    NoBall {
        #[serde(default = "default_no_ball_runs")]
        off_bat_runs: u32,
    },
    #[serde(alias = "1stbounce")]
    LegalVariant {
        #[serde(default)]
        off_bat_runs: u32,
    },
    Dot,
    Undo,
}

/// A tagged action whose values are out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAction(String);

impl fmt::Display for InvalidAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidAction {}

impl TryFrom<ActionRecord> for ScoringAction {
    type Error = InvalidAction;

    fn try_from(raw: ActionRecord) -> Result<Self, Self::Error> {
        Ok(match raw {
            ActionRecord::Run { value } => Self::run(value).ok_or_else(|| {
                InvalidAction(format!("run value {value} is outside 1-{MAX_RUN_VALUE}"))
            })?,
            ActionRecord::Wicket => ScoringAction::Wicket,
            ActionRecord::Wide => ScoringAction::Wide,
            ActionRecord::NoBall { off_bat_runs } => ScoringAction::NoBall { off_bat_runs },
            ActionRecord::LegalVariant { off_bat_runs } => {
                ScoringAction::LegalVariant { off_bat_runs }
            }
            ActionRecord::Dot => ScoringAction::Dot,
            ActionRecord::Undo => ScoringAction::Undo,
        })
    }
}

impl ScoringAction {
    /// Build a `Run` action, rejecting values outside 1-6.
    pub fn run(value: u32) -> Option<Self> {
        if (1..=MAX_RUN_VALUE).contains(&value) {
            Some(ScoringAction::Run { value })
        } else {
            None
        }
    }

    /// Parse an action from its short textual form (case-insensitive).
    ///
    /// Accepted forms: `1`..`6` or `run:N`, `0`/`dot`, `w`/`wicket`,
    /// `wd`/`wide`, `nb`/`noball[:N]`, `1b`/`bounce`/`legalVariant[:N]`,
    /// `u`/`undo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cricket_scorer_types::ScoringAction;
    ///
    /// assert_eq!(ScoringAction::from_str("run:2"), Some(ScoringAction::Run { value: 2 }));
    /// assert_eq!(ScoringAction::from_str("wicket"), Some(ScoringAction::Wicket));
    /// assert_eq!(ScoringAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let (kind, arg) = match lower.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg.trim())),
            None => (lower.as_str(), None),
        };
        let runs = |default: u32| -> Option<u32> {
            match arg {
                Some(a) => a.parse().ok(),
                None => Some(default),
            }
        };

        match kind {
            "run" | "r" => Self::run(arg?.parse().ok()?),
            "0" | "dot" | "." => Some(ScoringAction::Dot),
            "w" | "wicket" => Some(ScoringAction::Wicket),
            "wd" | "wide" => Some(ScoringAction::Wide),
            "nb" | "noball" => Some(ScoringAction::NoBall {
                off_bat_runs: runs(DEFAULT_NO_BALL_RUNS)?,
            }),
            "1b" | "bounce" | "1stbounce" | "legalvariant" => Some(ScoringAction::LegalVariant {
                off_bat_runs: runs(0)?,
            }),
            "u" | "undo" => Some(ScoringAction::Undo),
            digits => Self::run(digits.parse().ok()?),
        }
    }

    /// Wides and no-balls: they never consume a legal-ball slot.
    pub fn is_extra(&self) -> bool {
        matches!(self, ScoringAction::Wide | ScoringAction::NoBall { .. })
    }

    pub fn is_undo(&self) -> bool {
        matches!(self, ScoringAction::Undo)
    }
}

impl fmt::Display for ScoringAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringAction::Run { value } => write!(f, "run:{value}"),
            ScoringAction::Wicket => f.write_str("wicket"),
            ScoringAction::Wide => f.write_str("wide"),
            ScoringAction::NoBall { off_bat_runs } => write!(f, "noBall:{off_bat_runs}"),
            ScoringAction::LegalVariant { off_bat_runs } => {
                write!(f, "legalVariant:{off_bat_runs}")
            }
            ScoringAction::Dot => f.write_str("dot"),
            ScoringAction::Undo => f.write_str("undo"),
        }
    }
}

/// Presentation color bucket for a delivery.
///
/// - **Variant**: purple, legal-variant deliveries
/// - **Six**: green
/// - **Four**: blue
/// - **Wicket**: red
/// - **Extra**: amber, wides and no-balls
/// - **Default**: teal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColor {
    Variant,
    Six,
    Four,
    Wicket,
    Extra,
    Default,
}

impl BallColor {
    pub fn hex(&self) -> &'static str {
        match self {
            BallColor::Variant => "#7c3aed",
            BallColor::Six => "#10b981",
            BallColor::Four => "#3b82f6",
            BallColor::Wicket => "#ef4444",
            BallColor::Extra => "#f59e0b",
            BallColor::Default => "#14b8a6",
        }
    }

    /// The palette entry as an `(r, g, b)` triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BallColor::Variant => (0x7c, 0x3a, 0xed),
            BallColor::Six => (0x10, 0xb9, 0x81),
            BallColor::Four => (0x3b, 0x82, 0xf6),
            BallColor::Wicket => (0xef, 0x44, 0x44),
            BallColor::Extra => (0xf5, 0x9e, 0x0b),
            BallColor::Default => (0x14, 0xb8, 0xa6),
        }
    }
}
