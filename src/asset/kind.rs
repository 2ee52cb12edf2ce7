//! Bundle content kinds.

use std::fmt;

/// Content type of a bundle group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleKind {
    /// Script bundle (`.js`).
    Js,
    /// Stylesheet bundle (`.css`).
    Css,
}

impl BundleKind {
    /// File extension without the dot.
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
        }
    }

    /// Separator placed between concatenated entry points.
    ///
    /// Scripts get a newline so a file without a trailing newline cannot
    /// merge its last statement into the next file's first one.
    pub const fn joiner(self) -> &'static str {
        match self {
            Self::Js => "\n",
            Self::Css => "",
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}
