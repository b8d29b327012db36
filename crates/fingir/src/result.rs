//! Result and error types for Fingir.

use crate::pattern::MemberKey;
use thiserror::Error;

/// Result type for Fingir operations
pub type FingirResult<T> = Result<T, FingirError>;

/// Errors that can occur in Fingir
#[derive(Debug, Error)]
pub enum FingirError {
    /// A setup or verification descriptor could not be used
    #[error("unsupported call pattern: {message}")]
    UnsupportedPattern {
        /// What made the pattern unusable
        message: String,
    },

    /// Actual journaled call count differs from the expected count
    #[error("calls to member \"{member}\" expected: {expected}, but found: {actual}")]
    CallCountMismatch {
        /// Member the verification targeted
        member: MemberKey,
        /// Expected number of matching calls
        expected: usize,
        /// Matching calls actually journaled
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_count_mismatch_message() {
        let err = FingirError::CallCountMismatch {
            member: MemberKey::new("GetSum"),
            expected: 2,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "calls to member \"GetSum\" expected: 2, but found: 5"
        );
    }

    #[test]
    fn test_unsupported_pattern_message() {
        let err = FingirError::UnsupportedPattern {
            message: "member name must not be empty".to_string(),
        };
        assert!(err.to_string().contains("unsupported call pattern"));
    }
}
