//! Object storage paths of the form `scheme://bucket/key`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoragePathError;

/// Scheme of Amazon S3 paths.
pub const S3_SCHEME: &str = "s3";

/// A bucket and object key addressed by a storage path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocation {
    pub scheme: String,
    pub bucket: String,
    /// Object key; may contain further `/`.
    pub key: String,
}

impl StorageLocation {
    /// Split `scheme://bucket/key`.
    pub fn parse(path: &str) -> Result<Self, StoragePathError> {
        let (scheme, rest) = path
            .split_once("://")
            .filter(|(scheme, _)| is_valid_scheme(scheme))
            .ok_or_else(|| StoragePathError::MissingScheme(path.to_string()))?;

        let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(StoragePathError::EmptyBucket);
        }
        if key.is_empty() {
            return Err(StoragePathError::EmptyKey);
        }

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Split a path that must use the given scheme.
    pub fn parse_with_scheme(path: &str, expected: &str) -> Result<Self, StoragePathError> {
        let location = Self::parse(path)?;
        if !location.scheme.eq_ignore_ascii_case(expected) {
            return Err(StoragePathError::UnsupportedScheme {
                expected: expected.to_string(),
                found: location.scheme,
            });
        }
        Ok(location)
    }

    /// Split an `s3://bucket/key` path.
    pub fn parse_s3(path: &str) -> Result<Self, StoragePathError> {
        Self::parse_with_scheme(path, S3_SCHEME)
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl FromStr for StorageLocation {
    type Err = StoragePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}
