//! Sorting configuration.
//!
//! [`SortConfig`] controls how a [`DominanceMatrix`](super::DominanceMatrix)
//! evaluates its pairwise phase and how it treats value-equal vectors.

/// What to do when two vectors in one sort are value-equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Keep every copy as a separate entry. Equal vectors never dominate
    /// each other, so all copies land in the same front.
    #[default]
    Keep,

    /// Fail with [`ParetoError::DuplicateIdentity`](crate::ParetoError::DuplicateIdentity).
    Reject,
}

/// Configuration for fast non-dominated sorting.
///
/// # Defaults
///
/// ```
/// use u_pareto::front::{DuplicatePolicy, SortConfig};
///
/// let config = SortConfig::default();
/// assert!(config.parallel);
/// assert_eq!(config.parallel_threshold, 64);
/// assert_eq!(config.duplicates, DuplicatePolicy::Keep);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pareto::front::{DuplicatePolicy, SortConfig};
///
/// let config = SortConfig::default()
///     .with_parallel(false)
///     .with_duplicate_policy(DuplicatePolicy::Reject);
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortConfig {
    /// Whether to evaluate the pairwise phase in parallel using rayon.
    ///
    /// Has no effect unless the crate is built with the `parallel` feature.
    /// Output is identical either way.
    pub parallel: bool,

    /// Minimum number of vectors before parallel evaluation kicks in.
    ///
    /// Small inputs are cheaper to compare on the calling thread.
    pub parallel_threshold: usize,

    /// Handling of value-equal vectors.
    pub duplicates: DuplicatePolicy,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
            duplicates: DuplicatePolicy::Keep,
        }
    }
}

impl SortConfig {
    /// Enables or disables parallel pairwise evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the minimum input size for parallel evaluation.
    pub fn with_parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }

    /// Sets the duplicate policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Whether a sort over `n` vectors should run its pairwise phase in parallel.
    pub(crate) fn use_parallel(&self, n: usize) -> bool {
        self.parallel && n >= self.parallel_threshold.max(2)
    }
}
