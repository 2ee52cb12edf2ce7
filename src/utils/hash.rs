//! Content hashing using blake3.
//!
//! Used for content-addressed file names: copied resources and version
//! tokens. Integrity digests live in `asset::integrity` and use SHA-256.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute(b"some content");   // -> ContentHash
//! let fp = hash::fingerprint("some content"); // -> "a1b2c3d4"
//! ```

use std::fmt;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Compute blake3 hash of byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> ContentHash {
    ContentHash::new(*blake3::hash(data.as_ref()).as_bytes())
}

/// Compute hash and return as 8-char hex fingerprint.
///
/// Used as the version token in `app-a1b2c3d4.js`.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    compute(value).to_hex()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_deterministic() {
        assert_eq!(compute("body{}"), compute("body{}"));
        assert_ne!(compute("body{}"), compute("body{ }"));
    }

    #[test]
    fn test_hex_matches_blake3() {
        let hash = compute(b"hello");
        assert_eq!(hash.to_hex(), blake3::hash(b"hello").to_hex().to_string());
        assert_eq!(hash.to_hex().len(), 64);
    }

    #[test]
    fn test_fingerprint() {
        let fp = fingerprint("console.log(1)");
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fingerprint("console.log(1)"));
        assert_eq!(format!("{}", compute("x")).len(), 16);
    }
}
