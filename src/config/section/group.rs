//! `[[js]]` / `[[css]]` bundle group configuration.
//!
//! # Example
//!
//! ```toml
//! [[js]]
//! filename = "app"                      # → app.js / app-<token>.js
//! output_dir = "dist/js"                # defaults to build.output
//! entry_points = ["src/a.js", "src/b.js"]
//!
//! [[css]]
//! filename = "site"
//! entry_points = ["styles/base.css", "styles/theme.css"]
//! ```
//!
//! `outputDir` and `entryPoints` are accepted as aliases.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::BundleKind;
use crate::bundle::BundleGroup;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Base name of the bundle file, without extension.
    #[serde(alias = "name")]
    pub filename: String,

    /// Output directory for this bundle (relative to project root).
    #[serde(default, alias = "outputDir")]
    pub output_dir: Option<PathBuf>,

    /// Source files in concatenation order (relative to project root).
    #[serde(default, alias = "entryPoints")]
    pub entry_points: Vec<PathBuf>,
}

impl GroupConfig {
    /// Make an explicit `output_dir` absolute against the project root.
    pub fn normalize(&mut self, root: &Path) {
        if let Some(dir) = &mut self.output_dir {
            *dir = root.join(&*dir);
        }
    }

    /// Resolve into a pipeline group; `default_output` is `build.output`.
    pub fn to_group(&self, kind: BundleKind, default_output: &Path) -> BundleGroup {
        BundleGroup {
            name: self.filename.clone(),
            kind,
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| default_output.to_path_buf()),
            entry_points: self.entry_points.clone(),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

struct Fields {
    filename: FieldPath,
    entry_points: FieldPath,
}

const fn fields(kind: BundleKind) -> Fields {
    match kind {
        BundleKind::Js => Fields {
            filename: FieldPath::new("js.filename"),
            entry_points: FieldPath::new("js.entry_points"),
        },
        BundleKind::Css => Fields {
            filename: FieldPath::new("css.filename"),
            entry_points: FieldPath::new("css.entry_points"),
        },
    }
}

/// Tracks `(output dir, file name)` pairs to detect colliding bundles.
struct OutputNameTracker {
    seen: FxHashMap<(PathBuf, String), String>,
}

impl OutputNameTracker {
    fn new() -> Self {
        Self {
            seen: FxHashMap::default(),
        }
    }

    /// Check for conflict and insert. Reports error if conflict found.
    fn check_and_insert(
        &mut self,
        group: &BundleGroup,
        label: String,
        field: FieldPath,
        diag: &mut ConfigDiagnostics,
    ) {
        let file_name = format!("{}.{}", group.name, group.kind.ext());
        let key = (group.output_dir.clone(), file_name);
        if let Some(prev) = self.seen.get(&key) {
            diag.error(
                field,
                format!(
                    "{label} output conflict: `{}` is also produced by {prev} in '{}'",
                    key.1,
                    key.0.display(),
                ),
            );
        } else {
            self.seen.insert(key, label);
        }
    }
}

/// Validate all groups of a config.
pub fn validate_groups(
    js: &[GroupConfig],
    css: &[GroupConfig],
    default_output: &Path,
    versioning: bool,
    diag: &mut ConfigDiagnostics,
) {
    let mut outputs = OutputNameTracker::new();
    let mut manifest_keys: FxHashMap<String, String> = FxHashMap::default();

    let all = js
        .iter()
        .map(|g| (BundleKind::Js, g))
        .enumerate()
        .chain(css.iter().map(|g| (BundleKind::Css, g)).enumerate());

    for (idx, (kind, config)) in all {
        let fields = fields(kind);
        let label = format!("{kind}[{idx}]");

        if config.filename.trim().is_empty() {
            diag.error_with_hint(
                fields.filename,
                format!("{label} filename must not be empty"),
                "set `filename = \"app\"`",
            );
            continue;
        }
        if config.filename.contains(['/', '\\']) {
            diag.error_with_hint(
                fields.filename,
                format!("{label} filename `{}` contains a path separator", config.filename),
                "use `output_dir` to choose the directory",
            );
            continue;
        }

        let group = config.to_group(kind, default_output);

        if group.is_empty() {
            diag.warn(
                fields.entry_points,
                format!("{label} `{}` has no entry points and will be skipped", group.name),
            );
            continue;
        }

        for entry in &group.entry_points {
            let ext = entry.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !ext.eq_ignore_ascii_case(kind.ext()) {
                diag.warn(
                    fields.entry_points,
                    format!(
                        "{label} `{}`: entry `{}` is not a .{} file",
                        group.name,
                        entry.display(),
                        kind.ext()
                    ),
                );
            }
        }

        outputs.check_and_insert(&group, label.clone(), fields.filename, diag);

        if versioning && let Some(key) = group.manifest_key() {
            if let Some(prev) = manifest_keys.get(&key) {
                diag.error_with_hint(
                    fields.entry_points,
                    format!("{label} manifest key `{key}` is already used by {prev}"),
                    "the last entry point of each group must be unique",
                );
            } else {
                manifest_keys.insert(key, label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(filename: &str, entries: &[&str]) -> GroupConfig {
        GroupConfig {
            filename: filename.into(),
            output_dir: None,
            entry_points: entries.iter().map(PathBuf::from).collect(),
        }
    }

    fn validate(js: &[GroupConfig], css: &[GroupConfig], versioning: bool) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        validate_groups(js, css, Path::new("dist"), versioning, &mut diag);
        diag
    }

    #[test]
    fn test_aliases() {
        let config: GroupConfig = toml::from_str(
            r#"
            filename = "app"
            outputDir = "public"
            entryPoints = ["a.js", "b.js"]
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("public")));
        assert_eq!(config.entry_points.len(), 2);
    }

    #[test]
    fn test_to_group_defaults_output() {
        let config = group("app", &["a.js"]);
        let bundle = config.to_group(BundleKind::Js, Path::new("/site/dist"));
        assert_eq!(bundle.output_dir, PathBuf::from("/site/dist"));
        assert_eq!(bundle.kind, BundleKind::Js);
    }

    #[test]
    fn test_normalize_output_dir() {
        let mut config = group("app", &["a.js"]);
        config.normalize(Path::new("/site"));
        assert_eq!(config.output_dir, None);

        config.output_dir = Some(PathBuf::from("public/js"));
        config.normalize(Path::new("/site"));
        assert_eq!(config.output_dir, Some(PathBuf::from("/site/public/js")));
    }

    #[test]
    fn test_valid_groups() {
        let diag = validate(
            &[group("app", &["a.js", "b.js"]), group("vendor", &["v.js"])],
            &[group("app", &["a.css"])],
            true,
        );
        assert!(!diag.has_errors());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_bad_filenames() {
        let diag = validate(&[group("", &["a.js"]), group("js/app", &["b.js"])], &[], false);
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field.as_str(), "js.filename");
    }

    #[test]
    fn test_output_conflict() {
        let diag = validate(&[group("app", &["a.js"]), group("app", &["b.js"])], &[], false);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("output conflict"));
    }

    #[test]
    fn test_manifest_key_conflict_only_when_versioning() {
        let js = [group("one", &["shared.js"])];
        let more = [group("two", &["x.js", "shared.js"])];
        let all: Vec<_> = js.iter().chain(more.iter()).cloned().collect();

        assert!(!validate(&all, &[], false).has_errors());
        let diag = validate(&all, &[], true);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("shared.js"));
    }

    #[test]
    fn test_empty_and_mismatched_entries_warn() {
        let diag = validate(&[group("empty", &[])], &[group("site", &["theme.scss"])], true);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 2);
    }
}
