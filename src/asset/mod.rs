//! Bundle-level asset primitives: kinds, minifiers, naming and digests.

mod integrity;
mod kind;
pub mod minify;
pub mod version;

pub use integrity::IntegrityDigest;
pub use kind::BundleKind;
pub use minify::{CssMinifier, JsMinifier, Minifier, Minifiers, Passthrough};
pub use version::{OutputName, version_token};
