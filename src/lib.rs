//! `bank-stability` library crate.
//!
//! The binary (`bsd`) is a thin wrapper around this library so that:
//!
//! - the scoring core is testable without spawning processes
//! - the CLI and the TUI share one assessment pipeline
//! - presentation code stays out of the arithmetic

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod scoring;
pub mod tui;
