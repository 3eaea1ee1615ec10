//! Core scoring logic - pure, deterministic, and testable
//!
//! This crate holds the match ledger and the rules that move it forward one
//! delivery at a time. It has **no dependencies** on terminal, storage, or
//! async code, so the same transitions run in the TUI, in tests, and in
//! benchmarks.
//!
//! # Module Structure
//!
//! - [`ledger`]: players, deliveries, overs and the match aggregate
//! - [`classifier`]: legal-ball count to over/ball slot
//! - [`engine`]: applies a [`ScoringAction`](types::ScoringAction) to a snapshot
//! - [`projection`]: run rate, overs display, innings-over check, boundaries
//! - [`display`]: over summaries, ball colors and ball-box labels
//! - [`normalize`]: lenient decoding of stored matches
//!
//! # Scoring Rules
//!
//! - **Legal deliveries** (runs, dots, wickets, legal variants) advance the
//!   ball count; wides and no-balls do not.
//! - **Extras** score one penalty run plus any runs off the bat, and belong
//!   to the over that receives the next legal ball.
//! - **Strike** rotates on odd runs and at the end of every over.
//! - **Undo** reverses exactly the last recorded delivery, nothing more.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use cricket_scorer_core::{apply_action, Match};
//! use cricket_scorer_types::ScoringAction;
//!
//! let m = Match::new("m1", "Falcons", 20, Utc::now());
//! let m = apply_action(&m, ScoringAction::Run { value: 4 });
//! let m = apply_action(&m, ScoringAction::Wide);
//! assert_eq!(m.total_runs, 5);
//! assert_eq!(m.balls, 1);
//!
//! let m = apply_action(&m, ScoringAction::Undo);
//! assert_eq!(m.total_runs, 4);
//! ```

pub mod classifier;
pub mod display;
pub mod engine;
pub mod ledger;
pub mod normalize;
pub mod projection;
mod undo;

pub use cricket_scorer_types as types;

// Re-export commonly used types for convenience
pub use display::{ball_label, color_of, summary_of};
pub use engine::{apply_action, ScoringEngine, ScoringRules};
pub use ledger::{Delivery, DeliveryKind, Match, Over, Player};
pub use normalize::{match_from_str, match_from_value};
pub use projection::Boundaries;
