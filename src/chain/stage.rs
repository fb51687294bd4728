//! Pipeline stages.
//!
//! A [`Stage`] is either a dominance predicate ([`PredicateStage`]) or a
//! missing-pattern bucketing rule ([`GroupStage`]). Chains match on the
//! variant to decide how a partition is refined.

use std::fmt;
use std::sync::Arc;

use super::runner::Chain;
use crate::dominance::{
    dominates, Direction, Directions, MissingPolicy, ScalarComparator, Verdict,
};
use crate::error::Result;

/// Pareto dominance under one comparator, direction list and missing policy.
///
/// ```
/// use u_pareto::chain::PredicateStage;
/// use u_pareto::dominance::{ByValue, Direction, Verdict};
///
/// let stage = PredicateStage::new(ByValue, [Direction::Maximize, Direction::Minimize]);
/// let v = stage.compare(&[Some(3), Some(1)], &[Some(2), Some(1)]).unwrap();
/// assert_eq!(v, Verdict::Greater);
/// ```
pub struct PredicateStage<T> {
    comparator: Arc<dyn ScalarComparator<T>>,
    directions: Directions,
    missing: MissingPolicy,
}

impl<T> PredicateStage<T> {
    /// Creates a stage where missing values are bad.
    pub fn new<C>(comparator: C, directions: impl Into<Directions>) -> Self
    where
        C: ScalarComparator<T> + 'static,
    {
        Self {
            comparator: Arc::new(comparator),
            directions: directions.into(),
            missing: MissingPolicy::default(),
        }
    }

    /// Sets the missing-value policy.
    pub fn with_missing_policy(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Sets the missing-value policy from the "missing is good" flag.
    pub fn with_missing_is_good(self, missing_is_good: bool) -> Self {
        self.with_missing_policy(MissingPolicy::from_is_good(missing_is_good))
    }

    /// The per-dimension directions.
    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    /// The missing-value policy.
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }

    /// The scalar comparator.
    pub fn comparator(&self) -> &dyn ScalarComparator<T> {
        self.comparator.as_ref()
    }

    /// Pareto dominance of `a` over `b` under this stage.
    pub fn compare(&self, a: &[Option<T>], b: &[Option<T>]) -> Result<Verdict> {
        dominates(a, b, self.comparator.as_ref(), &self.directions, self.missing)
    }

    /// Wraps this stage into a one-element chain.
    pub fn as_chain(self) -> Chain<T> {
        Chain::from_stage(self)
    }

    /// Starts a chain with this stage followed by `next`.
    pub fn and_then(self, next: impl Into<Stage<T>>) -> Chain<T> {
        self.as_chain().and_then(next)
    }
}

impl<T> Clone for PredicateStage<T> {
    fn clone(&self) -> Self {
        Self {
            comparator: Arc::clone(&self.comparator),
            directions: self.directions.clone(),
            missing: self.missing,
        }
    }
}

impl<T> fmt::Debug for PredicateStage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateStage")
            .field("directions", &self.directions)
            .field("missing", &self.missing)
            .finish_non_exhaustive()
    }
}

/// Buckets vectors by the shape of their missing values.
///
/// The key starts at 0; each missing value adds 1 in a `Maximize`
/// dimension and subtracts 1 in a `Minimize` dimension. Present values and
/// ignored dimensions contribute nothing.
///
/// ```
/// use u_pareto::chain::GroupStage;
/// use u_pareto::dominance::{Direction, Directions};
///
/// let stage = GroupStage::new(Directions::all(Direction::Minimize, 3));
/// assert_eq!(stage.key(&[Some(0), None, None]).unwrap(), -2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupStage {
    directions: Directions,
}

impl GroupStage {
    /// Creates a grouping stage.
    pub fn new(directions: impl Into<Directions>) -> Self {
        Self {
            directions: directions.into(),
        }
    }

    /// The per-dimension directions.
    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    /// Missing-pattern key of `a`. Higher keys are preferred.
    pub fn key<T>(&self, a: &[Option<T>]) -> Result<i64> {
        self.directions.check_dim(a.len(), "group key")?;
        Ok(a.iter()
            .zip(self.directions.iter())
            .filter(|(value, _)| value.is_none())
            .map(|(_, direction)| match direction {
                Direction::Maximize => 1,
                Direction::Minimize => -1,
                Direction::Ignore => 0,
            })
            .sum())
    }

    /// Wraps this stage into a one-element chain.
    pub fn as_chain<T>(self) -> Chain<T> {
        Chain::from_stage(self)
    }

    /// Starts a chain with this stage followed by `next`.
    pub fn and_then<T>(self, next: impl Into<Stage<T>>) -> Chain<T> {
        self.as_chain().and_then(next)
    }
}

/// One refinement step of a [`Chain`].
#[derive(Debug)]
pub enum Stage<T> {
    /// Split each partition into dominance fronts.
    Predicate(PredicateStage<T>),
    /// Bucket each partition by missing-pattern key, highest key first.
    Group(GroupStage),
}

impl<T> Stage<T> {
    /// The per-dimension directions of either variant.
    pub fn directions(&self) -> &Directions {
        match self {
            Stage::Predicate(stage) => stage.directions(),
            Stage::Group(stage) => stage.directions(),
        }
    }

    /// Short name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Stage::Predicate(_) => "predicate",
            Stage::Group(_) => "group",
        }
    }
}

impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        match self {
            Stage::Predicate(stage) => Stage::Predicate(stage.clone()),
            Stage::Group(stage) => Stage::Group(stage.clone()),
        }
    }
}

impl<T> From<PredicateStage<T>> for Stage<T> {
    fn from(stage: PredicateStage<T>) -> Self {
        Stage::Predicate(stage)
    }
}

impl<T> From<GroupStage> for Stage<T> {
    fn from(stage: GroupStage) -> Self {
        Stage::Group(stage)
    }
}
