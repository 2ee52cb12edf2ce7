//! Build manifest: source entry → emitted bundle.
//!
//! Written as `manifest.json` into the build output when versioning is on:
//!
//! ```json
//! {
//!   "src/b.js": {
//!     "file": "app-1a2b3c4d.js",
//!     "isEntry": true,
//!     "integrity": "sha256:…"
//!   }
//! }
//! ```
//!
//! Keys are the last entry point of each group, in processing order.
//! `file` is the bundle path relative to the manifest's directory, which is
//! the bare file name for groups written to the build output itself.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::{BundleError, Result};
use crate::asset::IntegrityDigest;
use crate::utils::fs::FileSystem;

/// File name of the manifest inside the build output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One manifest record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ManifestEntry {
    /// `/`-separated path relative to the manifest directory.
    pub file: String,
    #[serde(rename = "isEntry")]
    pub is_entry: bool,
    pub integrity: IntegrityDigest,
}

impl ManifestEntry {
    pub fn new(file: impl Into<String>, integrity: IntegrityDigest) -> Self {
        Self {
            file: file.into(),
            is_entry: true,
            integrity,
        }
    }
}

/// Insertion-ordered manifest accumulated over one build.
#[derive(Debug, Default)]
pub struct Manifest {
    entries: Vec<(String, ManifestEntry)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A key recorded twice keeps its first position and the
    /// latest entry.
    pub fn record(&mut self, key: impl Into<String>, entry: ManifestEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Indented JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize and write to `<dir>/manifest.json`.
    pub fn flush(&self, fs: &dyn FileSystem, dir: &Path) -> Result<std::path::PathBuf> {
        let json = self.to_json()?;
        fs.ensure_dir(dir).map_err(|e| BundleError::write(dir, e))?;
        let path = dir.join(MANIFEST_FILE);
        fs.write_bytes(&path, json.as_bytes())
            .map_err(|e| BundleError::write(&path, e))?;
        Ok(path)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::LocalFs;
    use tempfile::TempDir;

    fn entry(file: &str) -> ManifestEntry {
        ManifestEntry::new(file, IntegrityDigest::of(file))
    }

    #[test]
    fn test_json_shape() {
        let mut manifest = Manifest::new();
        manifest.record("src/b.js", entry("app-12345678.js"));

        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        let record = &value["src/b.js"];
        assert_eq!(record["file"], "app-12345678.js");
        assert_eq!(record["isEntry"], true);
        assert_eq!(
            record["integrity"],
            IntegrityDigest::of("app-12345678.js").as_str()
        );
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut manifest = Manifest::new();
        manifest.record("z.js", entry("z.js"));
        manifest.record("a.js", entry("a.js"));
        manifest.record("m.css", entry("m.css"));

        let json = manifest.to_json().unwrap();
        let z = json.find("\"z.js\"").unwrap();
        let a = json.find("\"a.js\"").unwrap();
        let m = json.find("\"m.css\"").unwrap();
        assert!(z < a && a < m);
        assert!(json.contains("\n  \""), "expected indented output");
    }

    #[test]
    fn test_record_same_key_replaces_in_place() {
        let mut manifest = Manifest::new();
        manifest.record("a.js", entry("one.js"));
        manifest.record("b.js", entry("two.js"));
        manifest.record("a.js", entry("three.js"));

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.keys().collect::<Vec<_>>(), vec!["a.js", "b.js"]);
        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(value["a.js"]["file"], "three.js");
    }

    #[test]
    fn test_flush_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut manifest = Manifest::new();
        manifest.record("a.css", entry("site.css"));

        let path = manifest.flush(&LocalFs, &dir.path().join("dist")).unwrap();

        assert_eq!(path, dir.path().join("dist").join(MANIFEST_FILE));
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, manifest.to_json().unwrap());
    }
}
