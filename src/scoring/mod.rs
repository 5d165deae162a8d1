//! Stability scoring.
//!
//! The scorer is a small set of pure functions so the CLI, the TUI and the
//! sensitivity chart can all share it:
//! - `components` / `score` evaluate the weighted sum
//! - `classify` maps a score to a status
//! - `sensitivity` sweeps one metric across its UI range

pub mod scorer;
pub mod sweep;

pub use scorer::*;
pub use sweep::*;
