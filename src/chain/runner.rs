//! Chain orchestration.
//!
//! [`Chain`] applies its stages in order, each one turning a list of
//! partitions into a finer list of partitions:
//!
//! - a predicate stage replaces every partition with its dominance fronts;
//! - a group stage replaces every partition with its missing-pattern
//!   buckets, highest key first.
//!
//! Work is done on input indices; vectors are only cloned when the
//! materialising entry points build their output. The caller's slice is
//! never modified.

use std::collections::BTreeMap;

use tracing::debug;

use super::stage::{GroupStage, PredicateStage, Stage};
use crate::dominance::Verdict;
use crate::error::{ParetoError, Result};
use crate::front::{split_subset, DominanceMatrix, SortConfig};

/// Ordered sequence of stages.
///
/// # Usage
///
/// ```
/// use u_pareto::chain::{GroupStage, PredicateStage};
/// use u_pareto::dominance::{ByValue, Direction};
///
/// let chain = GroupStage::new([Direction::Minimize; 3])
///     .and_then(PredicateStage::new(ByValue, [Direction::Maximize; 3]));
///
/// let values = vec![
///     vec![Some(0), None, None],
///     vec![Some(2), Some(2), Some(2)],
///     vec![None, Some(1), Some(1)],
///     vec![Some(0), Some(0), Some(0)],
/// ];
/// let fronts = chain.split_by_pareto(&values).unwrap();
/// assert_eq!(
///     fronts,
///     vec![
///         vec![values[1].clone()],
///         vec![values[3].clone()],
///         vec![values[2].clone()],
///         vec![values[0].clone()],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Chain<T> {
    stages: Vec<Stage<T>>,
    config: SortConfig,
}

impl<T> Chain<T> {
    /// Creates a chain from explicit stages.
    ///
    /// # Errors
    ///
    /// [`ParetoError::EmptyChain`] if `stages` is empty.
    pub fn new(stages: Vec<Stage<T>>) -> Result<Self> {
        if stages.is_empty() {
            return Err(ParetoError::EmptyChain);
        }
        Ok(Self {
            stages,
            config: SortConfig::default(),
        })
    }

    /// Creates a one-element chain.
    pub fn from_stage(stage: impl Into<Stage<T>>) -> Self {
        Self {
            stages: vec![stage.into()],
            config: SortConfig::default(),
        }
    }

    /// Appends a stage.
    pub fn and_then(mut self, stage: impl Into<Stage<T>>) -> Self {
        self.stages.push(stage.into());
        self
    }

    /// Sets the sort configuration used by every predicate stage.
    pub fn with_config(mut self, config: SortConfig) -> Self {
        self.config = config;
        self
    }

    /// The stages in application order.
    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always `false`: a chain holds at least one stage.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The sort configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Lexicographic dominance over the predicate stages.
    ///
    /// Group stages are skipped. The first predicate stage that does not
    /// return `Equal` decides; if none does, the result is `Equal`.
    pub fn compare(&self, a: &[Option<T>], b: &[Option<T>]) -> Result<Verdict> {
        for stage in &self.stages {
            if let Stage::Predicate(stage) = stage {
                let verdict = stage.compare(a, b)?;
                if verdict != Verdict::Equal {
                    return Ok(verdict);
                }
            }
        }
        Ok(Verdict::Equal)
    }
}

impl<T: PartialEq + Sync> Chain<T> {
    /// Ranks `values` and returns partitions of input indices.
    ///
    /// Earlier partitions are strictly preferred. Every index in
    /// `0..values.len()` appears exactly once. Empty input gives an empty
    /// result.
    ///
    /// # Errors
    ///
    /// - [`ParetoError::Configuration`] if a vector's length differs from
    ///   any stage's direction count.
    /// - Any comparator or duplicate error raised while sorting.
    pub fn split_indices<V>(&self, values: &[V]) -> Result<Vec<Vec<usize>>>
    where
        V: AsRef<[Option<T>]>,
    {
        self.refine(values, |stage, partition| match stage {
            Stage::Predicate(stage) => self.pareto_split(values, partition, stage),
            Stage::Group(stage) => group_split(values, partition, stage),
        })
    }

    /// Ranks `values` into ordered partitions of cloned vectors.
    ///
    /// See [`split_indices`](Self::split_indices).
    pub fn split_by_pareto<V>(&self, values: &[V]) -> Result<Vec<Vec<V>>>
    where
        V: AsRef<[Option<T>]> + Clone,
    {
        let partitions = self.split_indices(values)?;
        Ok(materialize(values, partitions))
    }

    /// Preliminary split using per-dimension peeling instead of full sorting.
    ///
    /// Predicate stages peel off the vectors that are best in some single
    /// dimension; group stages bucket as in [`split_by_pareto`](Self::split_by_pareto).
    /// Groups may still contain internal dominance.
    pub fn split_by_dimensions<V>(&self, values: &[V]) -> Result<Vec<Vec<V>>>
    where
        V: AsRef<[Option<T>]> + Clone,
    {
        let partitions = self.refine(values, |stage, partition| match stage {
            Stage::Predicate(stage) => split_subset(
                values,
                partition.to_vec(),
                stage.comparator(),
                stage.directions(),
                stage.missing_policy(),
            ),
            Stage::Group(stage) => group_split(values, partition, stage),
        })?;
        Ok(materialize(values, partitions))
    }

    /// Validates dimensions, then flat-maps every partition through each stage.
    fn refine<V, F>(&self, values: &[V], split: F) -> Result<Vec<Vec<usize>>>
    where
        V: AsRef<[Option<T>]>,
        F: Fn(&Stage<T>, &[usize]) -> Result<Vec<Vec<usize>>>,
    {
        if self.stages.is_empty() {
            return Err(ParetoError::EmptyChain);
        }
        for value in values {
            for stage in &self.stages {
                stage.directions().check_dim(value.as_ref().len(), "chain")?;
            }
        }
        if values.is_empty() {
            return Ok(Vec::new());
        }

        debug!(values = values.len(), stages = self.stages.len(), "chain split started");

        let mut partitions = vec![(0..values.len()).collect::<Vec<usize>>()];
        for (index, stage) in self.stages.iter().enumerate() {
            let mut next = Vec::with_capacity(partitions.len());
            for partition in &partitions {
                next.extend(split(stage, partition)?);
            }
            debug!(
                stage = index,
                kind = stage.kind(),
                partitions = next.len(),
                "chain stage applied"
            );
            partitions = next;
        }

        Ok(partitions)
    }

    /// Fronts of one partition under a predicate stage, as input indices.
    fn pareto_split<V>(
        &self,
        values: &[V],
        partition: &[usize],
        stage: &PredicateStage<T>,
    ) -> Result<Vec<Vec<usize>>>
    where
        V: AsRef<[Option<T>]>,
    {
        let members: Vec<&[Option<T>]> =
            partition.iter().map(|&i| values[i].as_ref()).collect();
        let matrix = DominanceMatrix::build(&members, |a, b| stage.compare(a, b), &self.config)
            .map_err(|err| reindex(err, partition))?;
        let fronts = matrix.fronts()?;
        Ok(fronts
            .into_iter()
            .map(|front| front.into_iter().map(|local| partition[local]).collect())
            .collect())
    }
}

/// Buckets of one partition by group key, highest key first.
fn group_split<T, V>(
    values: &[V],
    partition: &[usize],
    stage: &GroupStage,
) -> Result<Vec<Vec<usize>>>
where
    V: AsRef<[Option<T>]>,
{
    let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for &i in partition {
        let key = stage.key(values[i].as_ref())?;
        buckets.entry(key).or_default().push(i);
    }
    Ok(buckets.into_values().rev().collect())
}

/// Maps partition-local indices in an error back to input indices.
fn reindex(err: ParetoError, partition: &[usize]) -> ParetoError {
    match err {
        ParetoError::DuplicateIdentity { first, second } => ParetoError::DuplicateIdentity {
            first: partition[first],
            second: partition[second],
        },
        other => other,
    }
}

fn materialize<V: Clone>(values: &[V], partitions: Vec<Vec<usize>>) -> Vec<Vec<V>> {
    partitions
        .into_iter()
        .map(|partition| partition.into_iter().map(|i| values[i].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::{ByNone, ByValue, ByValueAndNotNone, Direction};
    use crate::front::DuplicatePolicy;
    use proptest::prelude::*;

    type Row = Vec<Option<i32>>;

    fn max3() -> PredicateStage<i32> {
        PredicateStage::new(ByValue, [Direction::Maximize; 3])
    }

    fn seq() -> SortConfig {
        SortConfig::default().with_parallel(false)
    }

    fn reference_values() -> Vec<Row> {
        vec![
            vec![Some(0), None, None],
            vec![Some(2), Some(2), Some(2)],
            vec![Some(0), Some(1), Some(1)],
            vec![Some(0), Some(0), Some(1)],
            vec![None, Some(0), Some(1)],
            vec![Some(0), Some(1), Some(0)],
            vec![None, Some(1), Some(1)],
            vec![Some(1), Some(0), Some(0)],
            vec![Some(0), Some(0), Some(0)],
        ]
    }

    // ---- split_by_pareto ----

    #[test]
    fn test_single_stage_fronts() {
        let values: Vec<Row> = vec![
            vec![Some(2), Some(2), Some(2)],
            vec![Some(0), Some(1), Some(1)],
            vec![Some(0), Some(0), Some(1)],
            vec![Some(0), Some(1), Some(0)],
            vec![Some(1), Some(0), Some(0)],
            vec![Some(0), Some(0), Some(0)],
        ];
        let fronts = max3().as_chain().with_config(seq()).split_by_pareto(&values).unwrap();
        assert_eq!(
            fronts,
            vec![
                vec![values[0].clone()],
                vec![values[1].clone(), values[4].clone()],
                vec![values[2].clone(), values[3].clone()],
                vec![values[5].clone()],
            ]
        );
    }

    #[test]
    fn test_missing_counts_as_less() {
        let values: Vec<Row> = vec![
            vec![None, Some(0), Some(0)],
            vec![Some(0), Some(0), Some(0)],
        ];
        let indices = max3().as_chain().split_indices(&values).unwrap();
        assert_eq!(indices, vec![vec![1], vec![0]]);
    }

    #[test]
    fn test_missing_is_good() {
        let values: Vec<Row> = vec![
            vec![None, Some(0), Some(0)],
            vec![Some(0), Some(0), Some(0)],
        ];
        let chain = max3().with_missing_is_good(true).as_chain();
        assert_eq!(chain.split_indices(&values).unwrap(), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_group_then_predicate() {
        let values = reference_values();
        let chain = GroupStage::new([Direction::Minimize; 3])
            .and_then(max3())
            .with_config(seq());
        let indices = chain.split_indices(&values).unwrap();
        assert_eq!(
            indices,
            vec![vec![1], vec![2, 7], vec![3, 5], vec![8], vec![6], vec![4], vec![0]]
        );
    }

    #[test]
    fn test_group_buckets_descending() {
        let values: Vec<Row> = vec![
            vec![Some(1), None],
            vec![None, Some(1)],
            vec![Some(1), Some(1)],
            vec![None, None],
        ];
        // Missing in a maximized dimension raises the key; in a minimized one lowers it.
        let chain: Chain<i32> =
            GroupStage::new([Direction::Maximize, Direction::Minimize]).as_chain();
        let indices = chain.split_indices(&values).unwrap();
        assert_eq!(indices, vec![vec![1], vec![2, 3], vec![0]]);
    }

    #[test]
    fn test_predicate_then_predicate() {
        let values: Vec<Row> = vec![
            vec![Some(1), Some(5), Some(0)],
            vec![Some(1), Some(3), Some(0)],
            vec![Some(0), Some(9), Some(0)],
        ];
        // First stage only looks at dimension 0; second refines on dimension 1.
        use Direction::{Ignore, Maximize};
        let first: PredicateStage<i32> = PredicateStage::new(ByValue, [Maximize, Ignore, Ignore]);
        let second = PredicateStage::new(ByValue, [Ignore, Maximize, Ignore]);
        let chain = first.and_then(second).with_config(seq());
        assert_eq!(
            chain.split_indices(&values).unwrap(),
            vec![vec![0], vec![1], vec![2]]
        );
    }

    #[test]
    fn test_empty_input() {
        let values: Vec<Row> = Vec::new();
        assert!(max3().as_chain().split_by_pareto(&values).unwrap().is_empty());
    }

    #[test]
    fn test_input_not_modified() {
        let values = reference_values();
        let before = values.clone();
        let _ = max3().as_chain().split_by_pareto(&values).unwrap();
        assert_eq!(values, before);
    }

    #[test]
    fn test_dimension_mismatch() {
        let values: Vec<Row> = vec![vec![Some(1), Some(2)]];
        let err = max3().as_chain().split_indices(&values).unwrap_err();
        assert!(matches!(err, ParetoError::Configuration { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_comparison_error_aborts() {
        let values = vec![vec![Some(1.0)], vec![Some(f64::NAN)]];
        let chain: Chain<f64> = PredicateStage::new(ByValue, [Direction::Maximize]).as_chain();
        assert!(matches!(
            chain.split_indices(&values),
            Err(ParetoError::Comparison(_))
        ));
    }

    #[test]
    fn test_duplicates_reported_with_input_indices() {
        let values: Vec<Row> = vec![
            vec![Some(0), None, Some(0)],
            vec![Some(5), Some(5), Some(5)],
            vec![Some(0), None, Some(0)],
        ];
        let config = seq().with_duplicate_policy(DuplicatePolicy::Reject);
        let chain = GroupStage::new([Direction::Minimize; 3])
            .and_then(max3())
            .with_config(config);
        let err = chain.split_indices(&values).unwrap_err();
        assert_eq!(err, ParetoError::DuplicateIdentity { first: 0, second: 2 });
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert_eq!(Chain::<i32>::new(Vec::new()).unwrap_err(), ParetoError::EmptyChain);
    }

    // ---- compare ----

    #[test]
    fn test_compare_falls_through_equal_stages() {
        let presence = PredicateStage::new(ByNone, [Direction::Minimize; 2]);
        let value = PredicateStage::new(ByValue, [Direction::Maximize; 2]);
        let chain: Chain<i32> = GroupStage::new([Direction::Minimize; 2])
            .and_then(presence)
            .and_then(value);
        assert_eq!(chain.len(), 3);

        // Same presence pattern: decided by value.
        let verdict = chain.compare(&[Some(2), Some(2)], &[Some(1), Some(1)]).unwrap();
        assert_eq!(verdict, Verdict::Greater);
        // Different pattern: decided by presence first.
        let verdict = chain.compare(&[Some(9), None], &[Some(1), Some(1)]).unwrap();
        assert_eq!(verdict, Verdict::Less);
        // Incomparable everywhere.
        let verdict = chain.compare(&[Some(2), Some(1)], &[Some(1), Some(2)]).unwrap();
        assert_eq!(verdict, Verdict::Equal);
    }

    #[test]
    fn test_compare_group_only_chain_is_equal() {
        let chain: Chain<i32> = GroupStage::new([Direction::Maximize]).as_chain();
        assert_eq!(chain.compare(&[None], &[Some(1)]).unwrap(), Verdict::Equal);
    }

    // ---- split_by_dimensions ----

    #[test]
    fn test_split_by_dimensions() {
        let values = reference_values();
        let chain: Chain<i32> =
            PredicateStage::new(ByValueAndNotNone, [Direction::Maximize; 3]).as_chain();
        let groups = chain.split_by_dimensions(&values).unwrap();
        assert_eq!(
            groups,
            vec![
                vec![values[1].clone()],
                vec![
                    values[2].clone(),
                    values[3].clone(),
                    values[4].clone(),
                    values[5].clone(),
                    values[6].clone(),
                    values[7].clone(),
                ],
                vec![values[0].clone(), values[8].clone()],
            ]
        );
    }

    // ---- properties ----

    fn scalar() -> impl Strategy<Value = Option<i32>> {
        prop_oneof![4 => (0..4i32).prop_map(Some), 1 => Just(None)]
    }

    fn vectors() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(prop::collection::vec(scalar(), 3), 0..24)
    }

    fn directions() -> impl Strategy<Value = Vec<Direction>> {
        prop::collection::vec(
            prop_oneof![
                Just(Direction::Maximize),
                Just(Direction::Minimize),
                Just(Direction::Ignore)
            ],
            3,
        )
    }

    fn position_of(partitions: &[Vec<usize>], n: usize) -> Vec<usize> {
        let mut position = vec![usize::MAX; n];
        for (p, partition) in partitions.iter().enumerate() {
            for &i in partition {
                position[i] = p;
            }
        }
        position
    }

    proptest! {
        #[test]
        fn prop_output_is_partition(
            values in vectors(),
            dirs in directions(),
            good in any::<bool>()
        ) {
            let chain: Chain<i32> = GroupStage::new(dirs.clone())
                .and_then(PredicateStage::new(ByValue, dirs).with_missing_is_good(good));
            let partitions = chain.split_indices(&values).unwrap();
            let mut seen: Vec<usize> = partitions.iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..values.len()).collect::<Vec<_>>());
            prop_assert!(partitions.iter().all(|p| !p.is_empty()));
        }

        #[test]
        fn prop_fronts_are_ordered_and_non_dominated(values in vectors(), dirs in directions()) {
            let stage: PredicateStage<i32> = PredicateStage::new(ByValue, dirs);
            let chain = stage.clone().as_chain();
            let fronts = chain.split_indices(&values).unwrap();
            let position = position_of(&fronts, values.len());
            for i in 0..values.len() {
                for j in 0..values.len() {
                    if stage.compare(&values[i], &values[j]).unwrap() == Verdict::Greater {
                        prop_assert!(position[i] < position[j]);
                    }
                }
            }
        }

        #[test]
        fn prop_antisymmetric(
            a in prop::collection::vec(scalar(), 3),
            b in prop::collection::vec(scalar(), 3),
            dirs in directions(),
            good in any::<bool>()
        ) {
            let stage: PredicateStage<i32> =
                PredicateStage::new(ByValue, dirs).with_missing_is_good(good);
            let forward = stage.compare(&a, &b).unwrap();
            let backward = stage.compare(&b, &a).unwrap();
            prop_assert_eq!(forward, backward.reverse());
            prop_assert_eq!(stage.compare(&a, &a).unwrap(), Verdict::Equal);
        }

        #[test]
        fn prop_deterministic(values in vectors(), dirs in directions()) {
            let chain: Chain<i32> = GroupStage::new(dirs.clone())
                .and_then(PredicateStage::new(ByValue, dirs))
                .with_config(SortConfig::default().with_parallel_threshold(2));
            let first = chain.split_indices(&values).unwrap();
            let second = chain.split_indices(&values).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
