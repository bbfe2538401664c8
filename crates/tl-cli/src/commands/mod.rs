//! CLI subcommand implementations.

pub mod allocate;
pub mod classify;
pub mod days;
pub mod util;
