//! Error handling and result types for GapTree operations.
//!
//! User-facing failures (`NullElement`, `NotFound`, `InvalidConfiguration`,
//! `DuplicateKey`, `DestinationTooSmall`) are kept apart from the fatal
//! `InvariantViolation`, which only ever signals a bug inside the engine.

use thiserror::Error;

/// Error type for gap tree operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GapTreeError {
    /// An absent element was offered for insertion.
    #[error("Cannot insert an absent element")]
    NullElement,
    /// The element or key being altered or looked up is not present.
    #[error("Element not found in tree")]
    NotFound,
    /// A configuration parameter is outside its valid range.
    #[error("Invalid configuration for {parameter}: {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the supplied value was rejected.
        reason: String,
    },
    /// A keyed insert collided with a key that is already indexed.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    /// The destination slice cannot hold the requested elements.
    #[error("Destination too small: {required} slots required, {available} available")]
    DestinationTooSmall {
        /// Number of slots the copy needs.
        required: usize,
        /// Number of slots the destination offers past the offset.
        available: usize,
    },
    /// Internal data structure integrity violation.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl GapTreeError {
    /// Create an InvalidConfiguration error for a rebalance threshold.
    pub fn invalid_threshold(threshold: f64, min: f64, max: f64) -> Self {
        Self::InvalidConfiguration {
            parameter: "rebalance_threshold",
            reason: format!("{} is outside [{}, {}]", threshold, min, max),
        }
    }

    /// Create an InvalidConfiguration error for a space parameter that must be positive.
    pub fn non_positive(parameter: &'static str, value: usize) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: format!("{} must be positive", value),
        }
    }

    /// Create a DuplicateKey error from a printable key.
    pub fn duplicate_key<K: std::fmt::Debug>(key: &K) -> Self {
        Self::DuplicateKey(format!("{:?}", key))
    }

    /// Create an InvariantViolation with context.
    pub fn invariant_violation(context: &str, details: &str) -> Self {
        Self::InvariantViolation(format!("{}: {}", context, details))
    }

    /// Check if this error signals a bug in the engine rather than misuse.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    /// Check if this error is a configuration error.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

/// Public result type for tree operations that may fail.
pub type GapResult<T> = Result<T, GapTreeError>;

/// Result type for tree construction and reconfiguration.
pub type InitResult<T> = Result<T, GapTreeError>;

/// Result type for tree modification operations.
pub type ModifyResult<T> = Result<T, GapTreeError>;

/// Result extension trait for attaching context to errors.
pub trait GapResultExt<T> {
    /// Prefix message-carrying variants with `context`.
    fn with_context(self, context: &str) -> GapResult<T>;

    /// Prefix message-carrying variants with an operation name.
    fn with_operation(self, operation: &str) -> GapResult<T>;
}

impl<T> GapResultExt<T> for Result<T, GapTreeError> {
    fn with_context(self, context: &str) -> GapResult<T> {
        self.map_err(|e| match e {
            GapTreeError::InvariantViolation(msg) => {
                GapTreeError::invariant_violation(context, &msg)
            }
            GapTreeError::InvalidConfiguration { parameter, reason } => {
                GapTreeError::InvalidConfiguration {
                    parameter,
                    reason: format!("{}: {}", context, reason),
                }
            }
            GapTreeError::DuplicateKey(key) => {
                GapTreeError::DuplicateKey(format!("{}: {}", context, key))
            }
            other => other,
        })
    }

    fn with_operation(self, operation: &str) -> GapResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_error_message() {
        let err = GapTreeError::invalid_threshold(2.5, 1.0, 2.0);
        assert!(err.is_configuration_error());
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Invalid configuration for rebalance_threshold: 2.5 is outside [1, 2]"
        );
    }

    #[test]
    fn test_invariant_violation_is_fatal() {
        let err = GapTreeError::invariant_violation("keyed remove", "tree missing element");
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Invariant violation: keyed remove: tree missing element"
        );
    }

    #[test]
    fn test_with_operation_prefixes_message() {
        let result: GapResult<()> = Err(GapTreeError::InvariantViolation("lost".into()));
        let err = result.with_operation("remove").unwrap_err();
        assert_eq!(
            err,
            GapTreeError::InvariantViolation("Operation 'remove': lost".into())
        );
    }

    #[test]
    fn test_with_context_leaves_unit_variants_alone() {
        let result: GapResult<()> = Err(GapTreeError::NotFound);
        assert_eq!(result.with_context("alter"), Err(GapTreeError::NotFound));
    }
}
