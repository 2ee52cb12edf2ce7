//! mbundle - concatenate, minify and version JS/CSS bundles.
//!
//! The bundling engine ([`bundle::Pipeline`]) is usable on its own: a host
//! supplies a [`utils::fs::FileSystem`] and an [`bundle::EmitSink`] and gets
//! every bundle both written to disk and handed to its own output graph.
//! The `mbundle` binary wraps it with `mbundle.toml` config and a CLI.

pub mod asset;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod logger;
pub mod utils;

pub use asset::{BundleKind, IntegrityDigest, Minifier, Minifiers, OutputName};
pub use bundle::{
    BuildReport, BundleError, BundleGroup, BundleGroups, EmitSink, EmittedAssets, Manifest,
    Pipeline, PipelineOptions,
};
pub use config::BundleConfig;
