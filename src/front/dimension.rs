//! Per-dimension pre-splitting.
//!
//! A cheap O(n · d) alternative to the full O(n²) sort: repeatedly peel off
//! every vector that is best in at least one single dimension. Groups are
//! ordered, but a group may still contain internal dominance, so this is a
//! preliminary partition to refine with [`DominanceMatrix`](super::DominanceMatrix).

use crate::dominance::{
    cmp_to_target, Direction, Directions, MissingPolicy, ScalarComparator, Verdict,
};
use crate::error::Result;

/// Indices of the vectors that are best in at least one non-ignored dimension.
///
/// The result is in increasing index order. It is empty only when `values`
/// is empty or every dimension is ignored.
///
/// ```
/// use u_pareto::dominance::{ByValue, Direction, Directions, MissingPolicy};
/// use u_pareto::front::find_dimension_best_set;
///
/// let values = vec![
///     vec![Some(0), Some(0), Some(1)],
///     vec![Some(0), Some(1), Some(0)],
///     vec![Some(1), Some(0), Some(0)],
///     vec![Some(0), Some(0), Some(0)],
/// ];
/// let dirs = Directions::all(Direction::Maximize, 3);
/// let best = find_dimension_best_set(&values, &ByValue, &dirs, MissingPolicy::IsBad).unwrap();
/// assert_eq!(best, vec![0, 1, 2]);
/// ```
pub fn find_dimension_best_set<T, V, C>(
    values: &[V],
    cmp: &C,
    directions: &Directions,
    missing: MissingPolicy,
) -> Result<Vec<usize>>
where
    V: AsRef<[Option<T>]>,
    C: ScalarComparator<T> + ?Sized,
{
    check_dims(values, directions)?;
    let subset: Vec<usize> = (0..values.len()).collect();
    best_in_subset(values, &subset, cmp, directions, missing)
}

/// Splits `values` into ordered groups by repeated per-dimension peeling.
///
/// Every input index appears in exactly one group. If all dimensions are
/// ignored the whole input forms a single group.
///
/// ```
/// use u_pareto::dominance::{ByValue, Direction, Directions, MissingPolicy};
/// use u_pareto::front::split_by_dimensions;
///
/// let values = vec![
///     vec![Some(2), Some(2), Some(2)],
///     vec![Some(0), Some(1), Some(1)],
///     vec![Some(0), Some(0), Some(1)],
///     vec![Some(0), Some(1), Some(0)],
///     vec![Some(1), Some(0), Some(0)],
///     vec![Some(0), Some(0), Some(0)],
/// ];
/// let dirs = Directions::all(Direction::Maximize, 3);
/// let groups = split_by_dimensions(&values, &ByValue, &dirs, MissingPolicy::IsBad).unwrap();
/// assert_eq!(groups, vec![vec![0], vec![1, 2, 3, 4], vec![5]]);
/// ```
pub fn split_by_dimensions<T, V, C>(
    values: &[V],
    cmp: &C,
    directions: &Directions,
    missing: MissingPolicy,
) -> Result<Vec<Vec<usize>>>
where
    V: AsRef<[Option<T>]>,
    C: ScalarComparator<T> + ?Sized,
{
    check_dims(values, directions)?;
    let subset: Vec<usize> = (0..values.len()).collect();
    split_subset(values, subset, cmp, directions, missing)
}

/// Splits the vectors named by `subset`, returning groups of the same indices.
pub(crate) fn split_subset<T, V, C>(
    values: &[V],
    mut remaining: Vec<usize>,
    cmp: &C,
    directions: &Directions,
    missing: MissingPolicy,
) -> Result<Vec<Vec<usize>>>
where
    V: AsRef<[Option<T>]>,
    C: ScalarComparator<T> + ?Sized,
{
    let mut groups = Vec::new();

    while !remaining.is_empty() {
        let top = best_in_subset(values, &remaining, cmp, directions, missing)?;
        if top.is_empty() {
            groups.push(remaining);
            break;
        }
        remaining.retain(|i| top.binary_search(i).is_err());
        groups.push(top);
    }

    Ok(groups)
}

/// Best-in-some-dimension members of `subset`, sorted by index.
fn best_in_subset<T, V, C>(
    values: &[V],
    subset: &[usize],
    cmp: &C,
    directions: &Directions,
    missing: MissingPolicy,
) -> Result<Vec<usize>>
where
    V: AsRef<[Option<T>]>,
    C: ScalarComparator<T> + ?Sized,
{
    let Some((&first, rest)) = subset.split_first() else {
        return Ok(Vec::new());
    };

    let mut selected = Vec::new();
    for (d, direction) in directions.iter().enumerate() {
        if direction == Direction::Ignore {
            continue;
        }

        let mut best = vec![first];
        for &i in rest {
            let champion = values[best[0]].as_ref()[d].as_ref();
            let candidate = values[i].as_ref()[d].as_ref();
            match cmp_to_target(champion, candidate, cmp, direction, missing)? {
                Verdict::Greater => {}
                Verdict::Equal => best.push(i),
                Verdict::Less => best = vec![i],
            }
        }
        selected.extend(best);
    }

    selected.sort_unstable();
    selected.dedup();
    Ok(selected)
}

fn check_dims<T, V: AsRef<[Option<T>]>>(values: &[V], directions: &Directions) -> Result<()> {
    values
        .iter()
        .try_for_each(|v| directions.check_dim(v.as_ref().len(), "split_by_dimensions"))
}
