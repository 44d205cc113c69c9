//! Error types for the inmem-cache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: an engine was asked to start with an illegal capacity or TTL.
//! - [`CacheError`]: what the public API returns; wraps construction failures
//!   with the policy that failed and reports unknown policy tags.
//! - [`InvariantError`]: returned by `check_invariants` when the key map and
//!   the policy's auxiliary structure disagree.
//!
//! A missing or expired key is never an error; `get` returns `None`.
//!
//! ## Example Usage
//!
//! ```
//! use std::error::Error;
//! use inmem_cache::builder::{new_cache, with_capacity};
//! use inmem_cache::error::{CacheError, ConfigError};
//!
//! let err = new_cache::<u64, u64>("lru", [with_capacity(8)]).unwrap_err();
//! assert!(matches!(err, CacheError::Build { .. }));
//! let source = err.source().and_then(|e| e.downcast_ref::<ConfigError>());
//! assert_eq!(source, Some(&ConfigError::IllegalTtl));
//! ```

use std::fmt;

use thiserror::Error;

use crate::builder::CachePolicy;

/// Illegal construction parameters for a cache engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("capacity should be greater than 0")]
    IllegalCapacity,

    #[error("ttl should be greater than 0")]
    IllegalTtl,
}

/// Errors surfaced by the facade and the [`Cache`](crate::traits::Cache) trait.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The policy tag did not match `lfu`, `lru` or `ttl`.
    #[error("unknown cache type: {0}")]
    UnknownPolicy(String),

    /// The selected engine rejected its configuration.
    #[error("failed to build {policy} cache: {source}")]
    Build {
        policy: CachePolicy,
        #[source]
        source: ConfigError,
    },
}

impl CacheError {
    /// The underlying configuration error, if this is a build failure.
    pub fn config_error(&self) -> Option<ConfigError> {
        match self {
            Self::Build { source, .. } => Some(*source),
            Self::UnknownPolicy(_) => None,
        }
    }
}

/// Result alias for fallible cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::IllegalCapacity.to_string(),
            "capacity should be greater than 0"
        );
        assert_eq!(ConfigError::IllegalTtl.to_string(), "ttl should be greater than 0");
    }

    #[test]
    fn unknown_policy_names_the_tag() {
        let err = CacheError::UnknownPolicy("arc".to_string());
        assert_eq!(err.to_string(), "unknown cache type: arc");
        assert!(err.source().is_none());
        assert_eq!(err.config_error(), None);
    }

    #[test]
    fn build_error_preserves_source() {
        let err = CacheError::Build {
            policy: CachePolicy::Lfu,
            source: ConfigError::IllegalCapacity,
        };
        assert_eq!(
            err.to_string(),
            "failed to build lfu cache: capacity should be greater than 0"
        );
        let source = err.source().and_then(|e| e.downcast_ref::<ConfigError>());
        assert_eq!(source, Some(&ConfigError::IllegalCapacity));
        assert_eq!(err.config_error(), Some(ConfigError::IllegalCapacity));
    }

    #[test]
    fn invariant_error_message() {
        let err = InvariantError::new("map and age list disagree");
        assert_eq!(err.message(), "map and age list disagree");
        assert_eq!(err.to_string(), "map and age list disagree");
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
        assert_error::<CacheError>();
        assert_error::<InvariantError>();
    }
}
