//! Input/output helpers.
//!
//! - assessment JSON read/write (`assessment`)

pub mod assessment;

pub use assessment::*;
