//! Front extraction.
//!
//! Splits a set of vectors into ordered layers of mutually non-dominated
//! members.
//!
//! # Key Types
//!
//! - [`DominanceMatrix`]: fast non-dominated sort with an index arena
//! - [`SortConfig`]: parallel evaluation and duplicate handling
//!
//! # Functions
//!
//! - [`split_by_pareto`]: fronts under any dominance predicate
//! - [`split_by_dimensions`] / [`find_dimension_best_set`]: cheap
//!   per-dimension pre-split

mod config;
mod dimension;
mod matrix;

pub use config::{DuplicatePolicy, SortConfig};
pub use dimension::{find_dimension_best_set, split_by_dimensions};
pub(crate) use dimension::split_subset;
pub use matrix::{split_by_pareto, DominanceMatrix, NondominatedSortResult};
