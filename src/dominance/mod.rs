//! Directed Pareto dominance.
//!
//! The building blocks every stage is made of, leaves first:
//!
//! - [`ScalarComparator`]: orders two scalars of one dimension
//! - [`cmp_to_target`]: applies a [`Direction`] and [`MissingPolicy`] to a
//!   scalar comparison
//! - [`dominates`]: aggregates the per-dimension verdicts of two vectors
//!   into the Pareto dominance relation
//!
//! Vectors are plain slices of `Option<T>`; `None` marks a missing value.
//!
//! # References
//!
//! - Pareto (1896), *Cours d'économie politique*
//! - Deb (2001), *Multi-Objective Optimization using Evolutionary Algorithms*

mod comparator;
mod evaluator;
mod types;

pub use comparator::{
    by_none, by_value, by_value_and_not_none, ByNone, ByValue, ByValueAndNotNone,
    ScalarComparator,
};
pub use evaluator::{cmp_to_target, dominates};
pub use types::{Direction, Directions, MissingPolicy, Verdict};
