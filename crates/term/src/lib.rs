//! Terminal scoreboard module.
//!
//! Renders match snapshots into a simple framebuffer that is flushed to the
//! terminal with cell-level diffing. No widget toolkit is involved.
//!
//! - [`fb`]: cells, styles and the framebuffer
//! - [`score_view`]: pure snapshot to framebuffer mapping
//! - [`history_view`]: the list of finished matches
//! - [`setup_view`]: overs choice for a new match
//! - [`renderer`]: raw-mode terminal output

pub mod fb;
pub mod history_view;
pub mod renderer;
pub mod score_view;
pub mod setup_view;

pub use cricket_scorer_core as core;
pub use cricket_scorer_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_frame_into, TerminalRenderer};
pub use history_view::HistoryView;
pub use score_view::{ScoreboardView, StatusLines, Viewport, DETAIL_HELP};
pub use setup_view::{OversPicker, SetupView};
