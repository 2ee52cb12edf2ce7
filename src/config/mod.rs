//! Bundle configuration management for `mbundle.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [build], [resources], [[js]], [[css]]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file discovery
//! └── mod.rs         # BundleConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section         | Purpose                                         |
//! |-----------------|-------------------------------------------------|
//! | `[build]`       | Output directory, versioning, minification      |
//! | `[resources]`   | Directory stylesheet images are resolved from   |
//! | `[[js]]`        | Script bundle groups                            |
//! | `[[css]]`       | Stylesheet bundle groups                        |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSectionConfig, GroupConfig, ResourcesConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    asset::BundleKind,
    bundle::{BundleGroups, PipelineOptions},
    cli::{BuildArgs, Cli},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing mbundle.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Resource lookup settings
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Script bundle groups
    #[serde(default)]
    pub js: Vec<GroupConfig>,

    /// Stylesheet bundle groups
    #[serde(default)]
    pub css: Vec<GroupConfig>,
}

impl BundleConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;

        if let Some(args) = cli.build_args() {
            config.apply_build_args(args);
        }
        config.finalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("in {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set the root and make every configured path absolute.
    pub fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.build.normalize(root);
        self.resources.normalize(root);
        for group in self.js.iter_mut().chain(self.css.iter_mut()) {
            group.normalize(root);
        }
    }

    /// Validate the loaded config, printing warnings and failing on errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let diag = self.diagnose();
        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Collect all diagnostics without printing.
    pub fn diagnose(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        section::validate_groups(
            &self.js,
            &self.css,
            &self.build.output,
            self.build.versioning,
            &mut diag,
        );
        diag
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Bundle groups in pipeline form.
    pub fn groups(&self) -> BundleGroups {
        let output = &self.build.output;
        BundleGroups {
            js: self
                .js
                .iter()
                .map(|g| g.to_group(BundleKind::Js, output))
                .collect(),
            css: self
                .css
                .iter()
                .map(|g| g.to_group(BundleKind::Css, output))
                .collect(),
        }
    }

    /// Pipeline settings derived from this config.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            root: self.root.clone(),
            output_dir: self.build.output.clone(),
            resources_dir: self.resources.images.clone(),
            versioning: self.build.versioning,
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.versioning, args.versioning.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.output, args.output.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
[build]
output = "public"
versioning = false

[[js]]
filename = "app"
entry_points = ["src/a.js", "src/b.js"]

[[js]]
filename = "vendor"
output_dir = "public/vendor"
entryPoints = ["vendor/x.js"]

[[css]]
filename = "site"
entry_points = ["styles/site.css"]
"#;

    #[test]
    fn test_parse_example() {
        let config = BundleConfig::from_str(EXAMPLE).unwrap();
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.versioning);
        assert!(config.build.minify);
        assert_eq!(config.js.len(), 2);
        assert_eq!(config.css.len(), 1);
        assert_eq!(
            config.js[1].output_dir.as_deref(),
            Some(Path::new("public/vendor"))
        );
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = BundleConfig::from_str("").unwrap();
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.versioning);
        assert!(config.js.is_empty() && config.css.is_empty());
    }

    #[test]
    fn test_finalize_resolves_paths() {
        let mut config = BundleConfig::from_str(EXAMPLE).unwrap();
        config.finalize(Path::new("/site"));

        let groups = config.groups();
        assert_eq!(groups.js[0].output_dir, PathBuf::from("/site/public"));
        assert_eq!(groups.js[1].output_dir, PathBuf::from("/site/public/vendor"));
        assert_eq!(groups.css[0].kind, BundleKind::Css);

        let options = config.pipeline_options();
        assert_eq!(options.root, PathBuf::from("/site"));
        assert_eq!(options.output_dir, PathBuf::from("/site/public"));
        assert_eq!(
            options.resources_dir,
            PathBuf::from("/site/resources/images")
        );
        assert!(!options.versioning);
        assert_eq!(
            config.root_relative("/site/public/app.js"),
            PathBuf::from("public/app.js")
        );
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) = BundleConfig::parse_with_ignored(
            "[build]\noutput = \"dist\"\ncolour = true\n\n[[js]]\nfilename = \"a\"\nentry = []\n",
        )
        .unwrap();
        assert_eq!(config.js.len(), 1);
        assert_eq!(ignored, vec!["build.colour".to_string(), "js.0.entry".to_string()]);
    }

    #[test]
    fn test_validate_reports_conflicts() {
        let mut config = BundleConfig::from_str(
            "[[css]]\nfilename = \"site\"\nentry_points = [\"a.css\"]\n\n[[css]]\nfilename = \"site\"\nentry_points = [\"b.css\"]\n",
        )
        .unwrap();
        config.finalize(Path::new("/site"));

        match config.validate() {
            Err(ConfigError::Diagnostics(diag)) => assert_eq!(diag.len(), 1),
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_output_dir_conflicts_with_default() {
        let mut config = BundleConfig::from_str(
            r#"
[[js]]
filename = "app"
output_dir = "dist"
entry_points = ["a.js"]

[[js]]
filename = "app"
entry_points = ["b.js"]
"#,
        )
        .unwrap();
        config.finalize(Path::new("/site"));

        let diag = config.diagnose();
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("output conflict"));

        let groups = config.groups();
        assert_eq!(groups.js[0].output_dir, groups.js[1].output_dir);
    }
}
