//! Rewriting of local `url(...)` references in stylesheets.
//!
//! ```text
//! url("icons/logo.png")  →  url("images/<blake3>.png")
//!        │                           │
//!        └─ <root>/resources/images/icons/logo.png
//!                                    └─ copied to <output>/images/<blake3>.png
//! ```
//!
//! Only the spans found by the scan are replaced, so the same text
//! appearing elsewhere in the stylesheet (a selector, a comment) stays
//! untouched. Each distinct resource file is hashed and copied once per pass,
//! however many spellings (`a.png`, `./a.png`, `/a.png`) point at it.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use super::error::{BundleError, Result};
use crate::utils::{fs::FileSystem, hash, path::join_within};
use crate::debug;

/// Subdirectory of the output directory receiving copied resources.
pub const IMAGES_DIR: &str = "images";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)'|([^"'()\s]*))\s*\)"#)
        .expect("url() pattern is valid")
});

/// A `url(...)` value found in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef<'a> {
    /// Byte range of the value inside the stylesheet (quotes excluded).
    pub span: Range<usize>,
    pub value: &'a str,
}

/// Collect every `url(...)` value in source order.
pub fn scan_references(css: &str) -> Vec<ResourceRef<'_>> {
    URL_RE
        .captures_iter(css)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| ResourceRef {
            span: m.range(),
            value: m.as_str(),
        })
        .collect()
}

/// Whether a reference points outside the project and must be left alone.
fn is_external(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.is_empty()
        || lower.starts_with("data:")
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("//")
        || lower.starts_with('#')
}

/// Split `icon.svg#frag` / `font.woff?v=2` into path and suffix.
fn split_suffix(value: &str) -> (&str, &str) {
    match value.find(['?', '#']) {
        Some(idx) => value.split_at(idx),
        None => (value, ""),
    }
}

/// A local reference whose target does not exist; left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub reference: String,
    /// Where the file was looked for (`None` when it escapes the resources directory).
    pub looked_at: Option<PathBuf>,
}

/// Result of one rewrite pass.
#[derive(Debug, Default)]
pub struct Rewritten {
    pub css: String,
    /// Number of `url(...)` occurrences that were replaced.
    pub replaced: usize,
    /// Distinct resource files copied into the output.
    pub copied: Vec<PathBuf>,
    pub dangling: Vec<DanglingReference>,
}

/// Where resources come from and where they go.
pub struct ResourceRewriter<'a> {
    fs: &'a dyn FileSystem,
    resources_dir: &'a Path,
    output_dir: &'a Path,
}

impl<'a> ResourceRewriter<'a> {
    pub fn new(fs: &'a dyn FileSystem, resources_dir: &'a Path, output_dir: &'a Path) -> Self {
        Self {
            fs,
            resources_dir,
            output_dir,
        }
    }

    /// Rewrite all resolvable local references in `css`.
    pub fn rewrite(&self, css: &str) -> Result<Rewritten> {
        let references = scan_references(css);
        let mut resolved: FxHashMap<PathBuf, Option<String>> = FxHashMap::default();
        let mut out = Rewritten {
            css: String::with_capacity(css.len()),
            ..Rewritten::default()
        };
        let mut last = 0;

        for reference in &references {
            if is_external(reference.value) {
                debug!("rewrite"; "skipping external reference {}", reference.value);
                continue;
            }
            let (path_part, suffix) = split_suffix(reference.value.trim());

            let Some(source) = join_within(self.resources_dir, path_part.trim_start_matches('/'))
            else {
                if !out.dangling.iter().any(|d| d.reference == path_part) {
                    out.dangling.push(DanglingReference {
                        reference: path_part.to_string(),
                        looked_at: None,
                    });
                }
                continue;
            };

            let target = match resolved.get(&source) {
                Some(target) => target.clone(),
                None => {
                    let target = self.copy_resource(path_part, &source, &mut out)?;
                    resolved.insert(source, target.clone());
                    target
                }
            };

            if let Some(new_path) = target {
                out.css.push_str(&css[last..reference.span.start]);
                out.css.push_str(&new_path);
                out.css.push_str(suffix);
                last = reference.span.end;
                out.replaced += 1;
            }
        }

        out.css.push_str(&css[last..]);
        Ok(out)
    }

    /// Hash and copy one resource file, returning its new relative path.
    fn copy_resource(
        &self,
        reference: &str,
        source: &Path,
        out: &mut Rewritten,
    ) -> Result<Option<String>> {
        if !self.fs.is_file(source) {
            out.dangling.push(DanglingReference {
                reference: reference.to_string(),
                looked_at: Some(source.to_path_buf()),
            });
            return Ok(None);
        }

        let bytes = self
            .fs
            .read_bytes(source)
            .map_err(|e| BundleError::read(source, e))?;
        let file_name = content_addressed_name(&bytes, source);

        let images_dir = self.output_dir.join(IMAGES_DIR);
        self.fs
            .ensure_dir(&images_dir)
            .map_err(|e| BundleError::write(&images_dir, e))?;
        let dest = images_dir.join(&file_name);
        self.fs
            .copy(source, &dest)
            .map_err(|e| BundleError::write(&dest, e))?;

        debug!("rewrite"; "{} -> {}/{}", reference, IMAGES_DIR, file_name);
        out.copied.push(dest);
        Ok(Some(format!("{IMAGES_DIR}/{file_name}")))
    }
}

/// `<blake3 hex><.ext>` for a resource file.
pub fn content_addressed_name(bytes: &[u8], source: &Path) -> String {
    let hash = hash::compute(bytes).to_hex();
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{hash}.{ext}"),
        None => hash,
    }
}
