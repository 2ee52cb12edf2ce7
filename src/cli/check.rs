//! `check` command: validate config and list planned bundles.

use crate::{config::BundleConfig, log, utils::plural_count};
use anyhow::{Result, bail};

/// Print the groups that `build` would produce and verify their entry points exist.
pub fn check_config(config: &BundleConfig) -> Result<()> {
    let groups = config.groups();
    let mut missing = 0;

    for group in groups.iter() {
        let output = config.root_relative(config.get_root().join(&group.output_dir));
        log!(
            "check";
            "{} `{}` → {}/{}.{} ({})",
            group.kind,
            group.name,
            output.display(),
            group.name,
            group.kind.ext(),
            plural_count(group.entry_points.len(), "entry point")
        );

        for entry in &group.entry_points {
            if !config.get_root().join(entry).is_file() {
                log!("error"; "`{}`: entry point {} not found", group.name, entry.display());
                missing += 1;
            }
        }
    }

    if missing > 0 {
        bail!("{} missing", plural_count(missing, "entry point"));
    }

    log!("check"; "{} ok", plural_count(groups.len(), "group"));
    Ok(())
}
