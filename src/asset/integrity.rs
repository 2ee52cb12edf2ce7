//! Integrity digests for emitted bundles.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// SHA-256 digest of a bundle, rendered as `sha256:<hex>`.
///
/// Computed once from the final artifact bytes; identical bytes always give
/// the same digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrityDigest(String);

impl IntegrityDigest {
    /// Prefix naming the hash algorithm.
    pub const PREFIX: &'static str = "sha256:";

    /// Compute the digest of `bytes`.
    pub fn of(bytes: impl AsRef<[u8]>) -> Self {
        let hash = Sha256::digest(bytes.as_ref());
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex part without the algorithm prefix.
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// Check the digest against `bytes`, e.g. a file read back from disk.
    pub fn verify(&self, bytes: impl AsRef<[u8]>) -> bool {
        *self == Self::of(bytes)
    }
}

impl fmt::Display for IntegrityDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for IntegrityDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        let digest = IntegrityDigest::of("abc");
        assert_eq!(
            digest.as_str(),
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest.hex().len(), 64);
    }

    #[test]
    fn test_stable_and_verifiable() {
        let a = IntegrityDigest::of(b"body{color:red}");
        let b = IntegrityDigest::of(b"body{color:red}");
        assert_eq!(a, b);
        assert!(a.verify("body{color:red}"));
        assert!(!a.verify("body{color:blue}"));
    }

    #[test]
    fn test_serializes_as_string() {
        let digest = IntegrityDigest::of("x");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{digest}\""));
    }
}
