//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::ScoringAction`]s, the
//! session commands (save, complete, quit) and navigation between the
//! scoring, history and new-match screens. No rendering and no scoring
//! happens here.

pub mod handler;
pub mod map;

pub use cricket_scorer_types as types;

pub use handler::{InputHandler, Screen};
pub use map::{handle_key_event, should_quit, Command, Prompt};
