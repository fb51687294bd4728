//! Core value types for directed dominance.
//!
//! A vector is a fixed-length sequence of `Option<T>` scalars, where `None`
//! marks a missing value. [`Directions`] assigns an optimization sense to
//! every dimension, and [`MissingPolicy`] decides how a missing scalar
//! compares against a present one.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParetoError, Result};

/// Outcome of comparing two scalars or two vectors.
///
/// `Greater` and `Less` are strict. `Equal` covers both true equality and
/// mutual incomparability, so it is not transitive in general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// The left operand is strictly better.
    Greater,
    /// Neither side is strictly better.
    Equal,
    /// The right operand is strictly better.
    Less,
}

impl Verdict {
    /// Swaps `Greater` and `Less`; `Equal` is unchanged.
    pub fn reverse(self) -> Self {
        match self {
            Verdict::Greater => Verdict::Less,
            Verdict::Less => Verdict::Greater,
            Verdict::Equal => Verdict::Equal,
        }
    }

    /// Converts a standard ordering into a verdict.
    pub fn from_ordering(ordering: std::cmp::Ordering) -> Self {
        match ordering {
            std::cmp::Ordering::Greater => Verdict::Greater,
            std::cmp::Ordering::Less => Verdict::Less,
            std::cmp::Ordering::Equal => Verdict::Equal,
        }
    }
}

/// Optimization sense of a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Larger values are better.
    Maximize,
    /// Smaller values are better.
    Minimize,
    /// The dimension never influences dominance.
    Ignore,
}

impl Direction {
    /// Returns the opposite sense; `Ignore` stays `Ignore`.
    pub fn flip(self) -> Self {
        match self {
            Direction::Maximize => Direction::Minimize,
            Direction::Minimize => Direction::Maximize,
            Direction::Ignore => Direction::Ignore,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Maximize => "max",
            Direction::Minimize => "min",
            Direction::Ignore => "skip",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ParetoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" => Ok(Direction::Maximize),
            "min" | "minimize" => Ok(Direction::Minimize),
            "skip" | "ignore" => Ok(Direction::Ignore),
            other => Err(ParetoError::InvalidDirection(other.to_string())),
        }
    }
}

/// Per-dimension directions of one stage.
///
/// The length of the list is the vector dimension the stage accepts.
///
/// ```
/// use u_pareto::dominance::{Direction, Directions};
///
/// let dirs = Directions::new(vec![Direction::Maximize, Direction::Minimize]);
/// assert_eq!(dirs.dim(), 2);
/// assert_eq!(dirs.to_string(), "[max, min]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directions(Vec<Direction>);

impl Directions {
    /// Creates a direction list from explicit per-dimension senses.
    pub fn new(directions: Vec<Direction>) -> Self {
        Self(directions)
    }

    /// Creates a list of `dim` identical directions.
    pub fn all(direction: Direction, dim: usize) -> Self {
        Self(vec![direction; dim])
    }

    /// Parses a comma-separated list such as `"max,min,skip"`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self(Vec::new()));
        }
        s.split(',')
            .map(str::parse::<Direction>)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Direction of dimension `d`.
    pub fn get(&self, d: usize) -> Option<Direction> {
        self.0.get(d).copied()
    }

    /// All directions in dimension order.
    pub fn as_slice(&self) -> &[Direction] {
        &self.0
    }

    /// Iterates over the directions in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.iter().copied()
    }

    /// Fails with a configuration error unless `actual` equals [`dim`](Self::dim).
    pub fn check_dim(&self, actual: usize, context: &'static str) -> Result<()> {
        if actual != self.dim() {
            return Err(ParetoError::dimension(self.dim(), actual, context));
        }
        Ok(())
    }
}

impl From<Vec<Direction>> for Directions {
    fn from(directions: Vec<Direction>) -> Self {
        Self::new(directions)
    }
}

impl<const N: usize> From<[Direction; N]> for Directions {
    fn from(directions: [Direction; N]) -> Self {
        Self::new(directions.to_vec())
    }
}

impl fmt::Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{d}")?;
        }
        f.write_str("]")
    }
}

/// How a missing scalar compares against a present one.
///
/// Applied uniformly to every non-ignored dimension of a predicate stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissingPolicy {
    /// A missing value loses against any present value.
    #[default]
    IsBad,
    /// A missing value wins against any present value.
    IsGood,
}

impl MissingPolicy {
    /// Builds the policy from the "missing is good" flag.
    pub fn from_is_good(missing_is_good: bool) -> Self {
        if missing_is_good {
            MissingPolicy::IsGood
        } else {
            MissingPolicy::IsBad
        }
    }

    /// Returns `true` for [`MissingPolicy::IsGood`].
    pub fn is_good(self) -> bool {
        matches!(self, MissingPolicy::IsGood)
    }
}
