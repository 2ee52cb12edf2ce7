//! Bundle build orchestration.
//!
//! Build phases:
//! - **Init** - resolve groups and pipeline options from config
//! - **Bundle** - run the pipeline (JS groups, then CSS groups)
//! - **Report** - per-group summary, manifest path, totals

use crate::{
    asset::Minifiers,
    bundle::{BuildReport, EmittedAssets, Pipeline},
    config::BundleConfig,
    log,
    utils::{fs::LocalFs, plural_count},
};
use anyhow::{Context, Result};

/// Build every configured group.
pub fn build_bundles(config: &BundleConfig) -> Result<BuildReport> {
    let groups = config.groups();
    if groups.is_empty() {
        log!("warning"; "no [[js]] or [[css]] groups configured");
    }

    log!(
        "build";
        "bundling {}{}",
        plural_count(groups.len(), "group"),
        if config.build.versioning { " (versioned)" } else { "" }
    );

    let mut sink = EmittedAssets::new();
    let mut pipeline = Pipeline::new(
        config.pipeline_options(),
        &LocalFs,
        &mut sink,
        Minifiers::from_flag(config.build.minify),
    );
    let report = pipeline
        .run(&groups)
        .context("Build failed")?
        .unwrap_or_default();
    drop(pipeline);

    log_build_result(config, &report, &sink);
    Ok(report)
}

/// Print per-group lines and the build summary.
fn log_build_result(config: &BundleConfig, report: &BuildReport, sink: &EmittedAssets) {
    for group in &report.groups {
        let mut line = format!(
            "{} → {} ({})",
            group.name,
            config.root_relative(&group.path).display(),
            format_size(group.size)
        );
        if group.copied > 0 {
            line.push_str(&format!(", {}", plural_count(group.copied, "image")));
        }
        log!(group.kind.ext(); "{}", line);
    }

    if let Some(manifest) = &report.manifest {
        log!("manifest"; "{}", config.root_relative(manifest).display());
    }

    let dangling = report.dangling().count();
    if dangling > 0 {
        log!("warning"; "{} left unresolved", plural_count(dangling, "url() reference"));
    }

    log!(
        "build";
        "emitted {} ({})",
        plural_count(sink.len(), "bundle"),
        format_size(sink.total_bytes())
    );
}

/// Human readable byte size.
fn format_size(bytes: usize) -> String {
    match bytes {
        0..1024 => format!("{bytes} B"),
        1024..1_048_576 => format!("{:.1} KiB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MiB", bytes as f64 / 1_048_576.0),
    }
}
