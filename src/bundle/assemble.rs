//! Bundle assembly: read → join → rewrite (CSS) → minify.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::error::{BundleError, Result};
use super::group::BundleGroup;
use super::rewrite::{DanglingReference, ResourceRewriter};
use crate::asset::{BundleKind, Minifiers};
use crate::utils::fs::FileSystem;

/// Bundle content produced for one group.
#[derive(Debug)]
pub struct AssembledArtifact {
    pub code: String,
    pub kind: BundleKind,
    /// `url(...)` occurrences rewritten (CSS only).
    pub replaced: usize,
    /// Resources copied into `<output>/images` (CSS only).
    pub copied: Vec<PathBuf>,
    pub dangling: Vec<DanglingReference>,
}

pub struct Assembler<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    resources_dir: &'a Path,
    minifiers: &'a Minifiers,
}

impl<'a> Assembler<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        root: &'a Path,
        resources_dir: &'a Path,
        minifiers: &'a Minifiers,
    ) -> Self {
        Self {
            fs,
            root,
            resources_dir,
            minifiers,
        }
    }

    /// Read all entry points and join them in declared order.
    ///
    /// Reads run in parallel; any unreadable file fails the whole group.
    pub fn concat(&self, group: &BundleGroup) -> Result<String> {
        let contents = group
            .entry_points
            .par_iter()
            .map(|entry| {
                let path = self.root.join(entry);
                self.fs
                    .read_text(&path)
                    .map_err(|e| BundleError::read(path, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(contents.join(group.kind.joiner()))
    }

    /// Build the final bundle content for `group`.
    ///
    /// `output_dir` is the group's resolved output directory; copied CSS
    /// resources land in its `images/` subdirectory.
    pub fn assemble(&self, group: &BundleGroup, output_dir: &Path) -> Result<AssembledArtifact> {
        let joined = self.concat(group)?;

        let mut artifact = AssembledArtifact {
            code: String::new(),
            kind: group.kind,
            replaced: 0,
            copied: Vec::new(),
            dangling: Vec::new(),
        };

        let source = match group.kind {
            BundleKind::Js => joined,
            BundleKind::Css => {
                let rewritten =
                    ResourceRewriter::new(self.fs, self.resources_dir, output_dir).rewrite(&joined)?;
                artifact.replaced = rewritten.replaced;
                artifact.copied = rewritten.copied;
                artifact.dangling = rewritten.dangling;
                rewritten.css
            }
        };

        artifact.code = self
            .minifiers
            .for_kind(group.kind)
            .minify(&source)
            .map_err(|message| BundleError::Minify {
                group: group.name.clone(),
                kind: group.kind,
                message,
            })?;
        Ok(artifact)
    }
}
