//! `[resources]` section configuration.
//!
//! ```toml
//! [resources]
//! images = "resources/images"   # url(...) references resolve here
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory stylesheet `url(...)` references are resolved against.
    pub images: PathBuf,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            images: PathBuf::from("resources").join("images"),
        }
    }
}

impl ResourcesConfig {
    pub fn normalize(&mut self, root: &Path) {
        self.images = root.join(&self.images);
    }
}
