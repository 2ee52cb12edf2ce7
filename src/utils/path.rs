//! Path helpers.

use std::path::{Component, Path, PathBuf};

/// Join a relative reference onto `base` without leaving it.
///
/// The join is lexical: `.` is dropped and `..` pops a component, which may
/// step into `base` itself as long as the result ends up inside it again
/// (`../images/logo.png` against `.../images`). Returns `None` for absolute
/// references, empty results and anything resolving outside `base`.
pub fn join_within(base: &Path, reference: &str) -> Option<PathBuf> {
    let mut joined = base.to_path_buf();
    for component in Path::new(reference).components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !joined.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (joined != base && joined.starts_with(base)).then_some(joined)
}

/// Lexical path of `path` as seen from the directory `base`, `/`-separated.
///
/// Both paths are expected in the same form (both absolute or both
/// relative to the same root).
pub fn relative_slash_path(path: &Path, base: &Path) -> String {
    let path: Vec<_> = path.components().collect();
    let base: Vec<_> = base.components().collect();
    let common = path
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat_n("..".to_string(), base.len() - common);
    let rest = path[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    ups.chain(rest).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_within() {
        let base = Path::new("/site/resources/images");
        assert_eq!(
            join_within(base, "icons/logo.png"),
            Some(PathBuf::from("/site/resources/images/icons/logo.png"))
        );
        assert_eq!(
            join_within(base, "./a/../b.png"),
            Some(PathBuf::from("/site/resources/images/b.png"))
        );
        assert_eq!(join_within(base, "../secret.png"), None);
        assert_eq!(join_within(base, "/etc/passwd"), None);
        assert_eq!(join_within(base, "."), None);
    }

    #[test]
    fn test_join_within_reenters_base() {
        let base = Path::new("/site/resources/images");
        assert_eq!(
            join_within(base, "../images/logo.png"),
            Some(PathBuf::from("/site/resources/images/logo.png"))
        );
        assert_eq!(
            join_within(base, "../../resources/images/icons/x.svg"),
            Some(PathBuf::from("/site/resources/images/icons/x.svg"))
        );
        assert_eq!(join_within(base, "../fonts/a.woff"), None);
        assert_eq!(join_within(base, "../images"), None);
        assert_eq!(join_within(base, "../images-old/a.png"), None);
    }

    #[test]
    fn test_relative_slash_path() {
        let dist = Path::new("/site/dist");
        assert_eq!(
            relative_slash_path(Path::new("/site/dist/app.js"), dist),
            "app.js"
        );
        assert_eq!(
            relative_slash_path(Path::new("/site/dist/js/app.js"), dist),
            "js/app.js"
        );
        assert_eq!(
            relative_slash_path(Path::new("/site/public/js/app.js"), dist),
            "../public/js/app.js"
        );
    }
}
