//! SHA-256 fingerprint utilities
//!
//! A [`Fingerprint`] accumulates an ordered stream of fragments into one hex
//! digest. Every fragment is length-prefixed before it is hashed, so the
//! boundaries between fragments are part of the result: `["ab", "c"]` and
//! `["a", "bc"]` never collide.

use sha2::{Digest, Sha256};

/// Streaming, order-sensitive digest over byte fragments.
#[derive(Debug, Clone, Default)]
pub struct Fingerprint {
    hasher: Sha256,
    fragments: usize,
}

impl Fingerprint {
    /// Start an empty fingerprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fragment into the digest.
    pub fn update(&mut self, fragment: impl AsRef<[u8]>) {
        let bytes = fragment.as_ref();
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self.fragments += 1;
    }

    /// Number of fragments folded in so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Consume the fingerprint and return the lowercase hex digest.
    pub fn finish(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint_of<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
        let mut fingerprint = Fingerprint::new();
        for fragment in fragments {
            fingerprint.update(fragment);
        }
        fingerprint.finish()
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = fingerprint_of(["pkg==1.0", "-r reqs.txt"]);
        let b = fingerprint_of(["pkg==1.0", "-r reqs.txt"]);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_is_order_sensitive() {
        let a = fingerprint_of(["a", "b"]);
        let b = fingerprint_of(["b", "a"]);
        assert_ne!(a, b);
    }

    #[test]
    fn fragment_boundaries_matter() {
        let a = fingerprint_of(["ab", "c"]);
        let b = fingerprint_of(["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_fingerprint_is_still_a_digest() {
        let digest = Fingerprint::new().finish();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn counts_fragments() {
        let mut fingerprint = Fingerprint::new();
        fingerprint.update("one");
        fingerprint.update(b"two");
        assert_eq!(fingerprint.fragments(), 2);
    }
}
