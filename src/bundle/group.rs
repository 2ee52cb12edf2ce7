//! Bundle group input types.

use std::path::PathBuf;

use crate::asset::BundleKind;

/// A named, ordered set of source files merged into one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleGroup {
    /// Base name of the output file (`app` → `app.js`).
    pub name: String,
    pub kind: BundleKind,
    /// Where the bundle is written, relative to the project root.
    pub output_dir: PathBuf,
    /// Source files relative to the project root, in concatenation order.
    pub entry_points: Vec<PathBuf>,
}

impl BundleGroup {
    pub fn new(
        name: impl Into<String>,
        kind: BundleKind,
        output_dir: impl Into<PathBuf>,
        entry_points: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            output_dir: output_dir.into(),
            entry_points: entry_points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry_points.is_empty()
    }

    /// Manifest key: the last entry point as written in the config.
    pub fn manifest_key(&self) -> Option<String> {
        self.entry_points
            .last()
            .map(|p| p.to_string_lossy().into_owned())
    }
}

/// All groups of one build, scripts first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleGroups {
    pub js: Vec<BundleGroup>,
    pub css: Vec<BundleGroup>,
}

impl BundleGroups {
    /// Groups in processing order: every JS group, then every CSS group.
    pub fn iter(&self) -> impl Iterator<Item = &BundleGroup> {
        self.js.iter().chain(self.css.iter())
    }

    pub fn len(&self) -> usize {
        self.js.len() + self.css.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
