use crate::core::models::feature::{Feature, FeatureError, distance, merge};
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, instrument};

/// Distance in Angstroms at or below which two same-kind features are folded together.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 2.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MergeError {
    #[error("Merge threshold must be positive and finite (got {0})")]
    InvalidThreshold(f64),
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), MergeError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(MergeError::InvalidThreshold(threshold))
    }
}

fn find_mergeable_pair(features: &[Feature], threshold: f64) -> Option<(usize, usize)> {
    (0..features.len()).tuple_combinations().find(|&(i, j)| {
        let (a, b) = (&features[i], &features[j]);
        a.kind() == b.kind() && distance(a, b) <= threshold
    })
}

/// Collapses same-kind features lying within `threshold` of each other into weighted centroids.
///
/// The scan looks for any same-kind pair within the threshold, replaces the pair with its
/// merge (appended at the end of the working set), and starts over; it stops once a full
/// scan finds nothing to merge. The result is a fixpoint: no two features of the same kind
/// remain within `threshold`, and every output weight is the sum of the input weights folded
/// into it. Features of other kinds and isolated features pass through untouched.
///
/// When the same-kind proximity graph is not transitive (a chain whose ends are farther
/// apart than the threshold), which pairs end up together depends on scan order. Totals and
/// the fixpoint property hold either way.
///
/// Each merge removes one feature, so the loop runs at most `n - 1` times; every scan is
/// quadratic, for O(n³) overall on the small feature counts this is meant for.
///
/// # Errors
///
/// Returns [`MergeError::InvalidThreshold`] for non-positive or non-finite thresholds.
#[instrument(skip_all, name = "proximity_merge", fields(threshold = threshold))]
pub fn merge_nearby_features(
    features: &[Feature],
    threshold: f64,
) -> Result<Vec<Feature>, MergeError> {
    validate_threshold(threshold)?;

    let mut pool = features.to_vec();
    let mut merges = 0usize;

    while let Some((i, j)) = find_mergeable_pair(&pool, threshold) {
        // j > i, so removing j first leaves i in place.
        let second = pool.remove(j);
        let first = pool.remove(i);
        pool.push(merge(&first, &second)?);
        merges += 1;
    }

    debug!(
        input = features.len(),
        output = pool.len(),
        merges,
        "Proximity merge reached a fixpoint."
    );
    Ok(pool)
}
