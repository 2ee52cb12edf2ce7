//! Utility modules shared by the bundler and the CLI.

pub mod fs;
pub mod hash;
pub mod path;
mod plural;

pub use plural::{plural_count, plural_s};
