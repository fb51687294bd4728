//! Multi-stage ranking.
//!
//! Stages are composed into a [`Chain`] that refines an input set into an
//! ordered list of partitions. Each stage is one of:
//!
//! - [`PredicateStage`]: splits every partition into Pareto fronts
//! - [`GroupStage`]: buckets every partition by missing-value pattern
//!
//! # Example
//!
//! ```
//! use u_pareto::chain::PredicateStage;
//! use u_pareto::dominance::{ByValue, Direction};
//!
//! let chain = PredicateStage::new(ByValue, [Direction::Maximize, Direction::Minimize]).as_chain();
//! let values = vec![
//!     vec![Some(3), Some(1)],
//!     vec![Some(1), Some(3)],
//!     vec![Some(2), Some(2)],
//!     vec![Some(1), Some(4)],
//! ];
//! let fronts = chain.split_indices(&values).unwrap();
//! assert_eq!(fronts, vec![vec![0], vec![2], vec![1], vec![3]]);
//! ```

mod runner;
mod stage;

pub use runner::Chain;
pub use stage::{GroupStage, PredicateStage, Stage};
