//! Cluster-quality scoring for labeled point sets.
//!
//! The only export is the silhouette coefficient over `(points, labels)`
//! columns, shaped so any tree flattener (or any other labeling source) can
//! feed it without this crate knowing where the labels came from.

#![allow(clippy::bool_comparison)]

use ahash::HashMap;

/* ---------------------------------------------------------------------------------------------- */
/*                                           SILHOUETTE                                           */
/* ---------------------------------------------------------------------------------------------- */

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("points ({points}) and labels ({labels}) disagree in length")]
    LengthMismatch { points: usize, labels: usize },

    /// The silhouette is undefined unless there are between 2 and
    /// `samples - 1` distinct labels.
    #[error("need 2 to samples - 1 distinct labels, got {distinct} over {samples} sample(s)")]
    DegenerateLabels { distinct: usize, samples: usize },
}

/// Mean silhouette coefficient over every sample.
///
/// Per sample, `a` is the mean euclidean distance to the rest of its own
/// cluster and `b` the smallest mean distance to any other cluster;
/// the sample scores `(b - a) / max(a, b)`. Samples alone in their cluster
/// score 0, as do samples whose distances vanish entirely.
///
/// Labels are opaque tags: any two samples sharing a number belong to the
/// same cluster, whatever produced the numbers.
pub fn silhouette<P: AsRef<[f64]>>(points: &[P], labels: &[u32]) -> Result<f64, ScoreError> {
    if points.len() != labels.len() {
        return Err(ScoreError::LengthMismatch {
            points: points.len(),
            labels: labels.len(),
        });
    }

    let samples = points.len();

    let mut clusters: HashMap<u32, Vec<usize>> = HashMap::default();
    for (index, &label) in labels.iter().enumerate() {
        clusters.entry(label).or_default().push(index);
    }

    let distinct = clusters.len();
    if distinct < 2 || distinct > samples.saturating_sub(1) {
        return Err(ScoreError::DegenerateLabels { distinct, samples });
    }

    let distance = |a: usize, b: usize| -> f64 {
        points[a]
            .as_ref()
            .iter()
            .zip(points[b].as_ref())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    };

    let mut total = 0.;

    for (index, &label) in labels.iter().enumerate() {
        let own = &clusters[&label];

        if own.len() == 1 {
            continue;
        }

        let a = own
            .iter()
            .filter(|&&other| other != index)
            .map(|&other| distance(index, other))
            .sum::<f64>()
            / (own.len() - 1) as f64;

        let b = clusters
            .iter()
            .filter(|&(&other_label, _)| other_label != label)
            .map(|(_, members)| {
                members
                    .iter()
                    .map(|&other| distance(index, other))
                    .sum::<f64>()
                    / members.len() as f64
            })
            .fold(f64::INFINITY, f64::min);

        let spread = a.max(b);
        if spread > 0. {
            total += (b - a) / spread;
        }
    }

    Ok(total / samples as f64)
}

/* ---------------------------------------------------------------------------------------------- */
/*                                              TESTS                                             */
/* ---------------------------------------------------------------------------------------------- */
