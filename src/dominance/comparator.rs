//! Scalar comparators.
//!
//! A comparator orders two scalars of a single dimension and reports the
//! result as a [`Verdict`]. Comparators see the raw `Option` values so they
//! can be used on their own; inside a predicate stage the evaluator resolves
//! missing values first and only hands present pairs to the comparator.
//!
//! Built-in comparators:
//!
//! - [`by_value`] / [`ByValue`]: ordinal comparison of present values
//! - [`by_none`] / [`ByNone`]: presence versus absence only
//! - [`by_value_and_not_none`] / [`ByValueAndNotNone`]: ordinal comparison
//!   where any present value beats a missing one
//!
//! Any closure `Fn(Option<&T>, Option<&T>) -> Result<Verdict>` is also a
//! comparator.

use super::types::Verdict;
use crate::error::{ParetoError, Result};

/// Orders two scalars of one dimension.
///
/// Implementations must be consistent: swapping the arguments swaps
/// `Greater` and `Less`, and equal inputs give `Equal`.
pub trait ScalarComparator<T>: Send + Sync {
    /// Compares `a` against `b`.
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Verdict>;
}

impl<T, F> ScalarComparator<T> for F
where
    F: Fn(Option<&T>, Option<&T>) -> Result<Verdict> + Send + Sync,
{
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
        self(a, b)
    }
}

/// Ordinal comparison of two present values.
///
/// Fails if either value is missing or the values are not mutually
/// ordered (for example `f64::NAN`).
///
/// ```
/// use u_pareto::dominance::{by_value, Verdict};
///
/// assert_eq!(by_value(Some(&2), Some(&1)).unwrap(), Verdict::Greater);
/// assert_eq!(by_value(Some(&1), Some(&2)).unwrap(), Verdict::Less);
/// assert_eq!(by_value(Some(&2), Some(&2)).unwrap(), Verdict::Equal);
/// assert!(by_value(Some(&f64::NAN), Some(&1.0)).is_err());
/// ```
pub fn by_value<T: PartialOrd>(a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
    match (a, b) {
        (Some(a), Some(b)) => order(a, b),
        _ => Err(ParetoError::Comparison(
            "by_value requires two present values".into(),
        )),
    }
}

/// Structural comparison: a missing value is `Greater` than a present one.
///
/// Two missing or two present values are `Equal` regardless of content.
///
/// ```
/// use u_pareto::dominance::{by_none, Verdict};
///
/// assert_eq!(by_none(None, Some(&1)).unwrap(), Verdict::Greater);
/// assert_eq!(by_none(Some(&1), None).unwrap(), Verdict::Less);
/// assert_eq!(by_none::<i32>(None, None).unwrap(), Verdict::Equal);
/// assert_eq!(by_none(Some(&1), Some(&5)).unwrap(), Verdict::Equal);
/// ```
pub fn by_none<T>(a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
    Ok(match (a, b) {
        (None, Some(_)) => Verdict::Greater,
        (Some(_), None) => Verdict::Less,
        _ => Verdict::Equal,
    })
}

/// Ordinal comparison where a present value beats a missing one.
///
/// ```
/// use u_pareto::dominance::{by_value_and_not_none, Verdict};
///
/// assert_eq!(by_value_and_not_none(Some(&2), None).unwrap(), Verdict::Greater);
/// assert_eq!(by_value_and_not_none(None, Some(&2)).unwrap(), Verdict::Less);
/// assert_eq!(by_value_and_not_none::<i32>(None, None).unwrap(), Verdict::Equal);
/// assert_eq!(by_value_and_not_none(Some(&1), Some(&2)).unwrap(), Verdict::Less);
/// ```
pub fn by_value_and_not_none<T: PartialOrd>(a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
    match (a, b) {
        (Some(a), Some(b)) => order(a, b),
        (Some(_), None) => Ok(Verdict::Greater),
        (None, Some(_)) => Ok(Verdict::Less),
        (None, None) => Ok(Verdict::Equal),
    }
}

fn order<T: PartialOrd>(a: &T, b: &T) -> Result<Verdict> {
    a.partial_cmp(b)
        .map(Verdict::from_ordering)
        .ok_or_else(|| ParetoError::Comparison("values are not mutually ordered".into()))
}

/// Comparator object for [`by_value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

impl<T: PartialOrd> ScalarComparator<T> for ByValue {
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
        by_value(a, b)
    }
}

/// Comparator object for [`by_none`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByNone;

impl<T> ScalarComparator<T> for ByNone {
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
        by_none(a, b)
    }
}

/// Comparator object for [`by_value_and_not_none`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValueAndNotNone;

impl<T: PartialOrd> ScalarComparator<T> for ByValueAndNotNone {
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Verdict> {
        by_value_and_not_none(a, b)
    }
}
