//! Cache key derivation.
//!
//! Every directory under the cache root is named by a [`CacheKey`] derived
//! from the identifier it stands for (a title URL, a chapter URL). Keys are
//! the first 8 bytes of the SHA-256 digest of the identifier, rendered as 16
//! lowercase hex characters. The hash is fixed, so keys are stable across
//! process restarts and toolchain upgrades.
//!
//! This module does **not** perform any IO.

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

const KEY_BYTES: usize = 8;

/// Short deterministic name for an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for CacheKey {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Derive the cache key for `input`.
pub fn derive_key(input: &str) -> CacheKey {
    let digest = Sha256::digest(input.as_bytes());
    let key = digest[..KEY_BYTES]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();
    log::trace!("derived cache key {key} for '{input}'");
    CacheKey(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_is_deterministic() {
        let url = "https://example.org/manga/one-piece";
        assert_eq!(derive_key(url), derive_key(url));
    }

    #[test]
    fn test_derive_key_known_value() {
        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(derive_key("abc").as_str(), "ba7816bf8f01cfea");
    }

    #[test]
    fn test_derive_key_shape() {
        let key = derive_key("https://example.org/manga/one-piece/chapter-1");
        assert_eq!(key.as_str().len(), KEY_BYTES * 2);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_distinct_inputs_get_distinct_keys() {
        let a = derive_key("https://example.org/manga/a/chapter-1");
        let b = derive_key("https://example.org/manga/a/chapter-2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_input_is_accepted() {
        assert_eq!(derive_key("").as_str(), "e3b0c44298fc1c14");
    }
}
