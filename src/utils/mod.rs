//! Utility modules shared across the pipeline and the CLI.

pub mod date;
pub mod hash;
pub mod plural;

pub use plural::plural_count;
