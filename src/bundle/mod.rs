//! Bundle pipeline.
//!
//! ```text
//! Pipeline::run
//!   └─ for each group (JS first, then CSS)
//!        ├─ Assembler: read entries → join → [rewrite url()] → minify
//!        ├─ OutputName + IntegrityDigest
//!        ├─ write <output_dir>/<name>       (direct sink)
//!        ├─ EmitSink::emit(<name>)          (emit sink)
//!        └─ Manifest::record                (versioning only, path relative to the manifest)
//!   └─ Manifest::flush → <build output>/manifest.json (versioning only)
//! ```
//!
//! A [`Pipeline`] is built fresh for each build and runs at most once:
//! after a successful run every further `run` call is a no-op.

mod assemble;
mod error;
mod group;
mod manifest;
mod rewrite;
mod sink;


pub use assemble::{AssembledArtifact, Assembler};
pub use error::{BundleError, Result};
pub use group::{BundleGroup, BundleGroups};
pub use manifest::{MANIFEST_FILE, Manifest, ManifestEntry};
pub use rewrite::{DanglingReference, IMAGES_DIR, ResourceRewriter, Rewritten, scan_references};
pub use sink::{EmitSink, EmittedAsset, EmittedAssets};

use std::path::{Path, PathBuf};

use crate::asset::{BundleKind, IntegrityDigest, Minifiers, OutputName};
use crate::utils::fs::FileSystem;
use crate::utils::path::relative_slash_path;
use crate::{debug, log};

/// Build-wide settings of a pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Project root; entry points and group output directories are relative to it.
    pub root: PathBuf,
    /// Build output directory receiving `manifest.json`.
    pub output_dir: PathBuf,
    /// Directory `url(...)` references are resolved against.
    pub resources_dir: PathBuf,
    pub versioning: bool,
}

impl PipelineOptions {
    /// Options with the default `dist` output and `resources/images` lookup.
    pub fn new(root: impl Into<PathBuf>, versioning: bool) -> Self {
        let root = root.into();
        Self {
            output_dir: root.join("dist"),
            resources_dir: root.join("resources").join("images"),
            root,
            versioning,
        }
    }
}

/// Outcome of one bundled group.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub name: String,
    pub kind: BundleKind,
    pub file_name: String,
    pub path: PathBuf,
    pub size: usize,
    pub integrity: IntegrityDigest,
    pub replaced: usize,
    pub copied: usize,
    pub dangling: Vec<DanglingReference>,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub groups: Vec<GroupReport>,
    /// Names of groups skipped for having no entry points.
    pub skipped: Vec<String>,
    /// Path of the written manifest (versioning only).
    pub manifest: Option<PathBuf>,
}

impl BuildReport {
    pub fn dangling(&self) -> impl Iterator<Item = (&str, &DanglingReference)> {
        self.groups
            .iter()
            .flat_map(|g| g.dangling.iter().map(move |d| (g.name.as_str(), d)))
    }
}

/// Single-use bundle pipeline for one build.
pub struct Pipeline<'a> {
    options: PipelineOptions,
    fs: &'a dyn FileSystem,
    sink: &'a mut dyn EmitSink,
    minifiers: Minifiers,
    manifest: Manifest,
    executed: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        options: PipelineOptions,
        fs: &'a dyn FileSystem,
        sink: &'a mut dyn EmitSink,
        minifiers: Minifiers,
    ) -> Self {
        Self {
            options,
            fs,
            sink,
            minifiers,
            manifest: Manifest::new(),
            executed: false,
        }
    }

    /// Manifest accumulated so far.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Bundle every group and flush the manifest.
    ///
    /// Returns `Ok(None)` without touching anything if this pipeline has
    /// already completed a run. The first error aborts the run; files
    /// written before it stay on disk and no manifest is written.
    pub fn run(&mut self, groups: &BundleGroups) -> Result<Option<BuildReport>> {
        if self.executed {
            debug!("build"; "pipeline already executed, skipping");
            return Ok(None);
        }

        let mut report = BuildReport::default();
        for group in groups.iter() {
            if group.is_empty() {
                debug!("build"; "skipping {} group `{}`: no entry points", group.kind, group.name);
                report.skipped.push(group.name.clone());
                continue;
            }
            report.groups.push(self.bundle_group(group)?);
        }

        if self.options.versioning {
            let path = self.manifest.flush(self.fs, &self.options.output_dir)?;
            debug!("manifest"; "{} entries → {}", self.manifest.len(), path.display());
            report.manifest = Some(path);
        }

        self.executed = true;
        Ok(Some(report))
    }

    fn bundle_group(&mut self, group: &BundleGroup) -> Result<GroupReport> {
        let output_dir = self.options.root.join(&group.output_dir);
        let artifact = Assembler::new(
            self.fs,
            &self.options.root,
            &self.options.resources_dir,
            &self.minifiers,
        )
        .assemble(group, &output_dir)?;

        for dangling in &artifact.dangling {
            log!("warning"; "`{}`: unresolved url({}) left as-is", group.name, dangling.reference);
        }

        let bytes = artifact.code.as_bytes();
        let name = OutputName::for_content(&group.name, group.kind, bytes, self.options.versioning);
        let file_name = name.file_name();
        let integrity = IntegrityDigest::of(bytes);

        let path = output_dir.join(&file_name);
        self.fs
            .ensure_dir(&output_dir)
            .map_err(|e| BundleError::write(&output_dir, e))?;
        self.fs
            .write_bytes(&path, bytes)
            .map_err(|e| BundleError::write(&path, e))?;
        self.sink
            .emit(&file_name, bytes)
            .map_err(|e| BundleError::write(&file_name, e))?;

        if self.minifiers.for_kind(group.kind).writes_to_cwd() {
            self.remove_stray(&file_name, &path)?;
        }

        if self.options.versioning
            && let Some(key) = group.manifest_key()
        {
            let file = relative_slash_path(&path, &self.options.output_dir);
            self.manifest
                .record(key, ManifestEntry::new(file, integrity.clone()));
        }

        debug!("build"; "{} → {} ({} bytes)", group.name, path.display(), bytes.len());

        Ok(GroupReport {
            name: group.name.clone(),
            kind: group.kind,
            file_name,
            path,
            size: bytes.len(),
            integrity,
            replaced: artifact.replaced,
            copied: artifact.copied.len(),
            dangling: artifact.dangling,
        })
    }

    /// Remove a copy of `file_name` left in the project root by the minifier.
    fn remove_stray(&self, file_name: &str, written: &Path) -> Result<()> {
        let stray = self.options.root.join(file_name);
        if stray != written && self.fs.is_file(&stray) {
            debug!("build"; "removing stray {}", stray.display());
            self.fs
                .remove_file(&stray)
                .map_err(|e| BundleError::write(&stray, e))?;
        }
        Ok(())
    }
}
