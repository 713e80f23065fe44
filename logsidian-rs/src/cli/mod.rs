//! CLI command implementations.

pub mod args;
pub mod output;

pub mod convert;
pub mod migrate;

pub use args::{Cli, Commands};
pub use output::Output;
