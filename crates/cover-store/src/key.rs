//! Content-addressed keys for cover images.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoverStoreError;

const KEY_LEN: usize = 64;

/// Storage key of a cover image: the lowercase hex BLAKE3 hash of its bytes.
///
/// Identical uploads always map to the same key, so storing is an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoverKey(String);

impl CoverKey {
    pub fn for_content(data: &[u8]) -> Self {
        Self(blake3::hash(data).to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CoverKey {
    type Err = CoverStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == KEY_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !valid {
            return Err(CoverStoreError::InvalidKey(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for CoverKey {
    type Error = CoverStoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoverKey> for String {
    fn from(key: CoverKey) -> Self {
        key.0
    }
}

impl fmt::Display for CoverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable_for_identical_content() {
        let a = CoverKey::for_content(b"pudding.jpg bytes");
        let b = CoverKey::for_content(b"pudding.jpg bytes");
        let c = CoverKey::for_content(b"other bytes");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_parse_round_trips_and_rejects_garbage() {
        let key = CoverKey::for_content(b"x");
        let parsed: CoverKey = key.as_str().parse().unwrap();
        assert_eq!(parsed, key);

        assert!("cover-img-pudding1.jpg".parse::<CoverKey>().is_err());
        assert!("../../etc/passwd".parse::<CoverKey>().is_err());
        assert!(key.as_str().to_uppercase().parse::<CoverKey>().is_err());
    }
}
