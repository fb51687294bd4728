//! Fast non-dominated sorting over an index arena.
//!
//! [`DominanceMatrix`] records the dominance graph of a set of vectors and
//! peels it into fronts. Vectors are identified by their position in the
//! input slice, so value-equal or non-hashable vectors are handled safely.
//!
//! # Algorithm
//!
//! 1. **Build**: evaluate the predicate once per unordered pair `i < j`.
//!    `Greater` records the edge `i → j` and increments `j`'s dominated-by
//!    counter; `Less` records the symmetric edge.
//! 2. **Peel**: every vector with a zero counter forms the next front.
//!    Removing a front decrements the counters of everything it dominates.
//!
//! # Complexity
//!
//! O(n²) predicate evaluations and O(n + e) storage, where e is the
//! number of dominance edges.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Verma, Kumar & Mishra (2011), fast non-dominated sorting of graph nodes

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::{DuplicatePolicy, SortConfig};
use crate::dominance::Verdict;
use crate::error::{ParetoError, Result};

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the dominance rank of the input
/// at the same index. Rank 0 is the Pareto front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Dominance rank for each input (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front, each front in increasing index order.
    pub fronts: Vec<Vec<usize>>,
}

/// Dominance graph of one set of vectors.
#[derive(Debug, Clone)]
pub struct DominanceMatrix {
    /// `dominates[i]` lists every index that `i` dominates.
    dominates: Vec<Vec<usize>>,

    /// Number of vectors dominating each index.
    dominated_by: Vec<usize>,

    edges: usize,
}

impl DominanceMatrix {
    /// Evaluates `predicate` over every unordered pair of `values`.
    ///
    /// `predicate(a, b)` must return `Greater` when `a` dominates `b`,
    /// `Less` when `b` dominates `a`, and `Equal` otherwise.
    ///
    /// # Errors
    ///
    /// - Any error returned by `predicate` aborts the build.
    /// - [`ParetoError::DuplicateIdentity`] if two values are equal and the
    ///   config rejects duplicates.
    pub fn build<V, P>(values: &[V], predicate: P, config: &SortConfig) -> Result<Self>
    where
        V: PartialEq + Sync,
        P: Fn(&V, &V) -> Result<Verdict> + Sync,
    {
        let n = values.len();
        let parallel = config.use_parallel(n);
        let rows = evaluate_rows(values, &predicate, config.duplicates, parallel)?;

        let mut dominates = vec![Vec::new(); n];
        let mut dominated_by = vec![0usize; n];
        let mut edges = 0usize;

        for (i, row) in rows.into_iter().enumerate() {
            for (offset, verdict) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                match verdict {
                    Verdict::Greater => {
                        dominates[i].push(j);
                        dominated_by[j] += 1;
                        edges += 1;
                    }
                    Verdict::Less => {
                        dominates[j].push(i);
                        dominated_by[i] += 1;
                        edges += 1;
                    }
                    Verdict::Equal => {}
                }
            }
        }

        debug!(n, edges, parallel, "dominance matrix built");

        Ok(Self {
            dominates,
            dominated_by,
            edges,
        })
    }

    /// Number of vectors in the matrix.
    pub fn len(&self) -> usize {
        self.dominated_by.len()
    }

    /// Returns `true` if the matrix holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.dominated_by.is_empty()
    }

    /// Number of recorded dominance edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Indices dominated by vector `i`, in increasing order.
    pub fn dominated(&self, i: usize) -> &[usize] {
        &self.dominates[i]
    }

    /// Number of vectors that dominate vector `i`.
    pub fn domination_count(&self, i: usize) -> usize {
        self.dominated_by[i]
    }

    /// Peels the graph into fronts.
    ///
    /// # Errors
    ///
    /// [`ParetoError::CyclicDominance`] if the predicate was not a strict
    /// partial order and some vectors could never reach a zero counter.
    pub fn sort(&self) -> Result<NondominatedSortResult> {
        let n = self.len();
        let mut counts = self.dominated_by.clone();
        let mut ranks = vec![0usize; n];
        let mut fronts: Vec<Vec<usize>> = Vec::new();

        let mut current: Vec<usize> = (0..n).filter(|&i| counts[i] == 0).collect();
        let mut ranked = 0usize;

        while !current.is_empty() {
            let rank = fronts.len();
            let mut next = Vec::new();

            for &i in &current {
                ranks[i] = rank;
                for &j in &self.dominates[i] {
                    counts[j] -= 1;
                    if counts[j] == 0 {
                        next.push(j);
                    }
                }
            }

            trace!(rank, size = current.len(), "front extracted");
            ranked += current.len();
            fronts.push(current);

            next.sort_unstable();
            current = next;
        }

        if ranked < n {
            return Err(ParetoError::CyclicDominance {
                unranked: n - ranked,
            });
        }

        Ok(NondominatedSortResult { ranks, fronts })
    }

    /// Peels the graph and returns only the fronts.
    pub fn fronts(&self) -> Result<Vec<Vec<usize>>> {
        self.sort().map(|result| result.fronts)
    }

    /// Peels the graph and returns only the per-vector ranks.
    pub fn ranks(&self) -> Result<Vec<usize>> {
        self.sort().map(|result| result.ranks)
    }
}

/// Evaluates row `i` of the upper triangle: `predicate(values[i], values[j])` for `j > i`.
fn evaluate_row<V, P>(
    values: &[V],
    i: usize,
    predicate: &P,
    duplicates: DuplicatePolicy,
) -> Result<Vec<Verdict>>
where
    V: PartialEq,
    P: Fn(&V, &V) -> Result<Verdict>,
{
    let a = &values[i];
    values[i + 1..]
        .iter()
        .enumerate()
        .map(|(offset, b)| {
            if duplicates == DuplicatePolicy::Reject && a == b {
                return Err(ParetoError::DuplicateIdentity {
                    first: i,
                    second: i + 1 + offset,
                });
            }
            predicate(a, b)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_rows<V, P>(
    values: &[V],
    predicate: &P,
    duplicates: DuplicatePolicy,
    parallel: bool,
) -> Result<Vec<Vec<Verdict>>>
where
    V: PartialEq + Sync,
    P: Fn(&V, &V) -> Result<Verdict> + Sync,
{
    let n = values.len();
    if parallel {
        (0..n)
            .into_par_iter()
            .map(|i| evaluate_row(values, i, predicate, duplicates))
            .collect()
    } else {
        (0..n)
            .map(|i| evaluate_row(values, i, predicate, duplicates))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_rows<V, P>(
    values: &[V],
    predicate: &P,
    duplicates: DuplicatePolicy,
    _parallel: bool,
) -> Result<Vec<Vec<Verdict>>>
where
    V: PartialEq + Sync,
    P: Fn(&V, &V) -> Result<Verdict> + Sync,
{
    (0..values.len())
        .map(|i| evaluate_row(values, i, predicate, duplicates))
        .collect()
}

/// Splits `values` into fronts under an arbitrary dominance predicate.
///
/// Front 0 holds the non-dominated values; within a front, values keep
/// their input order. The input is not modified.
///
/// ```
/// use u_pareto::dominance::{dominates, ByValue, Direction, Directions, MissingPolicy};
/// use u_pareto::front::split_by_pareto;
///
/// let dirs = Directions::all(Direction::Maximize, 3);
/// let values = vec![
///     vec![Some(2), Some(2), Some(2)],
///     vec![Some(0), Some(1), Some(1)],
///     vec![Some(0), Some(0), Some(1)],
///     vec![Some(0), Some(1), Some(0)],
///     vec![Some(1), Some(0), Some(0)],
///     vec![Some(0), Some(0), Some(0)],
/// ];
/// let fronts = split_by_pareto(&values, |a: &Vec<Option<i32>>, b: &Vec<Option<i32>>| {
///     dominates(a, b, &ByValue, &dirs, MissingPolicy::IsBad)
/// })
/// .unwrap();
///
/// assert_eq!(fronts.len(), 4);
/// assert_eq!(fronts[1], vec![values[1].clone(), values[4].clone()]);
/// ```
pub fn split_by_pareto<V, P>(values: &[V], predicate: P) -> Result<Vec<Vec<V>>>
where
    V: Clone + PartialEq + Sync,
    P: Fn(&V, &V) -> Result<Verdict> + Sync,
{
    let matrix = DominanceMatrix::build(values, predicate, &SortConfig::default())?;
    Ok(matrix
        .fronts()?
        .into_iter()
        .map(|front| front.into_iter().map(|i| values[i].clone()).collect())
        .collect())
}
