//! Domain-agnostic Pareto dominance ranking.
//!
//! Ranks collections of fixed-dimension vectors into ordered layers of
//! mutually non-dominated members ("fronts"):
//!
//! - **Dominance**: per-dimension directions (maximize, minimize, ignore),
//!   a configurable missing-value policy, and pluggable scalar comparators.
//! - **Fronts**: fast non-dominated sorting over an index arena, with
//!   optional parallel pairwise evaluation.
//! - **Chains**: ordered compositions of predicate stages (split into
//!   fronts) and group stages (bucket by missing-value pattern).
//!
//! Vectors are slices of `Option<T>`; `None` marks a missing value. Every
//! operation is pure and leaves the caller's data untouched.
//!
//! # Example
//!
//! ```
//! use u_pareto::chain::PredicateStage;
//! use u_pareto::dominance::{ByValue, Direction};
//!
//! let chain = PredicateStage::new(ByValue, [Direction::Maximize; 3]).as_chain();
//! let values = vec![
//!     vec![Some(2), Some(2), Some(2)],
//!     vec![Some(0), Some(1), Some(1)],
//!     vec![Some(0), Some(0), Some(1)],
//!     vec![Some(0), Some(1), Some(0)],
//!     vec![Some(1), Some(0), Some(0)],
//!     vec![Some(0), Some(0), Some(0)],
//! ];
//! let fronts = chain.split_indices(&values).unwrap();
//! assert_eq!(fronts, vec![vec![0], vec![1, 4], vec![2, 3], vec![5]]);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate the pairwise dominance phase with rayon
//! - `serde`: derive serialization for the plain data types

pub mod chain;
pub mod dominance;
mod error;
pub mod front;

pub use error::{ParetoError, Result};
