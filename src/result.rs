//! Result type used throughout monologue.
//!
//! A type alias for `color_eyre::eyre::Result<T>`, giving every fallible
//! function in the crate colorized error reports and chain-able error
//! context via `.wrap_err()`.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout monologue.
pub type Result<T> = EyreResult<T>;
