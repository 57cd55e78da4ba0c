//! Error types for rule construction and node dispatch.
//!
//! A failed match is never an error: `matches_tag` returns a plain boolean
//! and `search` returns `Ok(None)` for a node that does not match. User
//! predicates return booleans too; a predicate that panics propagates to
//! the caller unchanged.

use std::fmt;

/// Errors produced while building a strainer or dispatching a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrainError {
    /// A match rule was assembled with zero or more than one assertion set,
    /// or a byte-string literal was not valid UTF-8.
    InvalidRule {
        /// What was wrong with the rule parts.
        reason: String,
    },

    /// A regular expression source string failed to compile.
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// The compile error, stringified.
        source: String,
    },

    /// `search` was offered a node kind the strainer cannot match against.
    UnsupportedNode {
        /// The node kind as reported by the parser (e.g. `"comment"`).
        kind: String,
    },
}

impl fmt::Display for StrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRule { reason } => write!(f, "invalid match rule: {reason}"),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern {pattern:?}: {source}")
            }
            Self::UnsupportedNode { kind } => {
                write!(f, "cannot match against a node of kind {kind:?}")
            }
        }
    }
}

impl std::error::Error for StrainError {}
