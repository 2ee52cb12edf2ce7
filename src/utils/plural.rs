//! Pluralization helpers for log lines.

/// Return "s" suffix for plural counts
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, e.g. `3 groups`, `1 reference`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "group"), "0 groups");
        assert_eq!(plural_count(1, "group"), "1 group");
        assert_eq!(plural_count(2, "image"), "2 images");
    }
}
