//! Error type shared by every ranking operation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParetoError>;

/// Failures surfaced by dominance evaluation, sorting, and chains.
///
/// Every computation in this crate is pure, so an error always aborts the
/// whole call and no partial output is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParetoError {
    /// A stage's direction list does not match the vector dimension.
    #[error("{context}: expected dimension {expected}, got {actual}")]
    Configuration {
        expected: usize,
        actual: usize,
        context: &'static str,
    },

    /// A scalar comparator could not order two values.
    #[error("comparison failed: {0}")]
    Comparison(String),

    /// Two value-equal vectors were supplied while duplicates are rejected.
    #[error("vectors at indices {first} and {second} are indistinguishable")]
    DuplicateIdentity { first: usize, second: usize },

    /// The dominance predicate produced a cycle, leaving vectors unranked.
    #[error("dominance predicate is cyclic: {unranked} vectors could not be ranked")]
    CyclicDominance { unranked: usize },

    /// A direction name could not be parsed.
    #[error("unknown direction '{0}'")]
    InvalidDirection(String),

    /// A chain was built without any stage.
    #[error("chain must contain at least one stage")]
    EmptyChain,
}

impl ParetoError {
    pub(crate) fn dimension(expected: usize, actual: usize, context: &'static str) -> Self {
        Self::Configuration {
            expected,
            actual,
            context,
        }
    }
}
