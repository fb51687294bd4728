//! Directed per-dimension evaluation and vector dominance.

use super::comparator::ScalarComparator;
use super::types::{Direction, Directions, MissingPolicy, Verdict};
use crate::error::Result;

/// Compares two scalars of one dimension under a direction and missing policy.
///
/// Rules, in order:
///
/// 1. `Ignore` gives `Equal` regardless of the values.
/// 2. Exactly one side missing: the missing side is `Less` under
///    [`MissingPolicy::IsBad`] and `Greater` under [`MissingPolicy::IsGood`].
/// 3. Both missing gives `Equal`.
/// 4. Both present: the comparator decides; `Minimize` swaps the result.
///
/// ```
/// use u_pareto::dominance::{cmp_to_target, ByValue, Direction, MissingPolicy, Verdict};
///
/// let v = cmp_to_target(Some(&2), Some(&1), &ByValue, Direction::Minimize, MissingPolicy::IsBad);
/// assert_eq!(v.unwrap(), Verdict::Less);
///
/// let v = cmp_to_target(None, Some(&1), &ByValue, Direction::Maximize, MissingPolicy::IsGood);
/// assert_eq!(v.unwrap(), Verdict::Greater);
/// ```
pub fn cmp_to_target<T, C>(
    a: Option<&T>,
    b: Option<&T>,
    cmp: &C,
    direction: Direction,
    missing: MissingPolicy,
) -> Result<Verdict>
where
    C: ScalarComparator<T> + ?Sized,
{
    if direction == Direction::Ignore {
        return Ok(Verdict::Equal);
    }

    let missing_side = match (a, b) {
        (None, None) => return Ok(Verdict::Equal),
        (None, Some(_)) => Verdict::Greater,
        (Some(_), None) => Verdict::Less,
        (Some(_), Some(_)) => {
            let verdict = cmp.compare(a, b)?;
            return Ok(match direction {
                Direction::Minimize => verdict.reverse(),
                _ => verdict,
            });
        }
    };

    // `missing_side` is the verdict when missing values are good.
    Ok(match missing {
        MissingPolicy::IsGood => missing_side,
        MissingPolicy::IsBad => missing_side.reverse(),
    })
}

/// Pareto dominance of vector `a` over vector `b`.
///
/// Returns `Greater` when `a` is at least as good in every considered
/// dimension and strictly better in one, `Less` for the converse, and
/// `Equal` otherwise (identical, all ignored, or incomparable).
///
/// Both vectors must have exactly `directions.dim()` components. Every
/// dimension is evaluated, so a comparator error is reported even when the
/// outcome is already known to be `Equal`.
///
/// ```
/// use u_pareto::dominance::{dominates, ByValue, Direction, Directions, MissingPolicy, Verdict};
///
/// let dirs = Directions::all(Direction::Maximize, 2);
/// let a = [Some(2), Some(2)];
/// let b = [Some(2), Some(1)];
/// assert_eq!(dominates(&a, &b, &ByValue, &dirs, MissingPolicy::IsBad).unwrap(), Verdict::Greater);
/// assert_eq!(
///     dominates(&[Some(1), Some(0)], &[Some(0), Some(1)], &ByValue, &dirs, MissingPolicy::IsBad)
///         .unwrap(),
///     Verdict::Equal
/// );
/// ```
pub fn dominates<T, C>(
    a: &[Option<T>],
    b: &[Option<T>],
    cmp: &C,
    directions: &Directions,
    missing: MissingPolicy,
) -> Result<Verdict>
where
    C: ScalarComparator<T> + ?Sized,
{
    directions.check_dim(a.len(), "dominates")?;
    directions.check_dim(b.len(), "dominates")?;

    let mut greater_in_some = false;
    let mut less_in_some = false;

    for ((va, vb), direction) in a.iter().zip(b.iter()).zip(directions.iter()) {
        match cmp_to_target(va.as_ref(), vb.as_ref(), cmp, direction, missing)? {
            Verdict::Greater => greater_in_some = true,
            Verdict::Less => less_in_some = true,
            Verdict::Equal => {}
        }
    }

    Ok(match (greater_in_some, less_in_some) {
        (true, false) => Verdict::Greater,
        (false, true) => Verdict::Less,
        _ => Verdict::Equal,
    })
}
