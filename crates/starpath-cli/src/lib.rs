//! Starpath CLI library.
//!
//! Terminal styling and output formatting for the `starpath` binary.

pub mod output;
pub mod terminal;
