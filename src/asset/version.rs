//! Output file naming for bundles.
//!
//! Without versioning a bundle is written as `app.js`. With versioning the
//! name carries a content token, `app-a1b2c3d4.js`, derived from the final
//! bytes so that identical inputs keep identical names across builds and
//! changed content always produces a new name for cache busting.

use std::fmt;

use super::BundleKind;
use crate::utils::hash;

/// Final file name of one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputName {
    pub base: String,
    pub token: Option<String>,
    pub kind: BundleKind,
}

impl OutputName {
    pub fn new(base: impl Into<String>, kind: BundleKind, token: Option<String>) -> Self {
        Self {
            base: base.into(),
            token,
            kind,
        }
    }

    /// Name for `bytes`, versioned when `versioning` is on.
    pub fn for_content(
        base: impl Into<String>,
        kind: BundleKind,
        bytes: impl AsRef<[u8]>,
        versioning: bool,
    ) -> Self {
        let token = versioning.then(|| version_token(bytes));
        Self::new(base, kind, token)
    }

    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{}-{}.{}", self.base, token, self.kind.ext()),
            None => write!(f, "{}.{}", self.base, self.kind.ext()),
        }
    }
}

/// Version token for bundle content (first 8 hex chars of its blake3 hash).
pub fn version_token(bytes: impl AsRef<[u8]>) -> String {
    hash::fingerprint(bytes.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let name = OutputName::for_content("app", BundleKind::Js, "let a=1", false);
        assert_eq!(name.file_name(), "app.js");
        assert!(name.token.is_none());
    }

    #[test]
    fn test_versioned_name() {
        let name = OutputName::for_content("site", BundleKind::Css, "body{}", true);
        let token = version_token("body{}");
        assert_eq!(name.file_name(), format!("site-{token}.css"));
        assert_eq!(token.len(), 8);
        assert_eq!(
            name,
            OutputName::new("site", BundleKind::Css, Some(token.clone()))
        );
    }

    #[test]
    fn test_token_follows_content() {
        let a = OutputName::for_content("app", BundleKind::Js, "a()", true);
        let b = OutputName::for_content("app", BundleKind::Js, "a()", true);
        let c = OutputName::for_content("app", BundleKind::Js, "b()", true);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
