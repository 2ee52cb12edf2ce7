//! Configuration section definitions.
//!
//! Each module corresponds to a section in `mbundle.toml`:
//!
//! | Module      | TOML Section          | Purpose                          |
//! |-------------|-----------------------|----------------------------------|
//! | `build`     | `[build]`             | Output, versioning, minification |
//! | `resources` | `[resources]`         | Where `url()` images live        |
//! | `group`     | `[[js]]` / `[[css]]`  | Bundle groups                    |

mod build;
mod group;
mod resources;

pub use build::BuildSectionConfig;
pub use group::{GroupConfig, validate_groups};
pub use resources::ResourcesConfig;
