//! Config file discovery.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/src/js/      ← cwd
/// /home/user/site/mbundle.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src/js");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("mbundle.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("mbundle.toml"));
        assert_eq!(found, Some(dir.path().join("mbundle.toml")));
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.toml");

        assert_eq!(find_config_file_from(dir.path(), &config), None);

        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &config), Some(config));
    }
}
