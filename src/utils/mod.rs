//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`paths`]: Path manipulation (tilde expansion, base-relative
//!   resolution, atomic writes)

/// Path manipulation and resolution utilities
pub mod paths;

pub use paths::{resolve_path, write_atomic};
