//! Cricket scorer (workspace facade crate).
//!
//! Re-exports the member crates under `cricket_scorer::{core,input,store,term,types}`
//! so the binary, integration tests and benchmarks share one import path.

pub use cricket_scorer_core as core;
pub use cricket_scorer_input as input;
pub use cricket_scorer_store as store;
pub use cricket_scorer_term as term;
pub use cricket_scorer_types as types;
