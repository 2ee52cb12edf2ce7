//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"       # Build output; manifest.json is written here
//! versioning = true     # Content-hashed file names + manifest.json
//! minify = true         # Minify bundles (oxc / lightningcss)
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Build output directory.
    pub output: PathBuf,

    /// Append a content token to bundle names and write `manifest.json`.
    #[serde(alias = "file_versioning")]
    pub versioning: bool,

    /// Minify bundles.
    pub minify: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            versioning: true,
            minify: true,
        }
    }
}

impl BuildSectionConfig {
    const OUTPUT: FieldPath = FieldPath::new("build.output");

    /// Normalize paths relative to the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.output = root.join(&self.output);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::OUTPUT,
                "output directory must not be empty",
                "use `output = \"dist\"`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildSectionConfig::default();
        assert_eq!(config.output, PathBuf::from("dist"));
        assert!(config.versioning);
        assert!(config.minify);
    }

    #[test]
    fn test_file_versioning_alias() {
        let config: BuildSectionConfig = toml::from_str("file_versioning = false").unwrap();
        assert!(!config.versioning);
        assert_eq!(config.output, PathBuf::from("dist"));
    }

    #[test]
    fn test_normalize_and_validate() {
        let mut config = BuildSectionConfig::default();
        config.normalize(Path::new("/site"));
        assert_eq!(config.output, PathBuf::from("/site/dist"));

        let mut diag = ConfigDiagnostics::new();
        BuildSectionConfig {
            output: PathBuf::new(),
            ..BuildSectionConfig::default()
        }
        .validate(&mut diag);
        assert!(diag.has_errors());
    }
}
