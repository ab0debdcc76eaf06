use std::str::FromStr;

use tap::Tap;

use crate::primitive::{distance_sqr, AxisIndex};
use crate::tree::BuildError;

/* ---------------------------------------------------------------------------------------------- */
/*                                        DIMENSION CHOICE                                        */
/* ---------------------------------------------------------------------------------------------- */

/// Strategy which picks the coordinate axis a split or seed computation
/// works on.
///
/// Strategies never see an empty member set; tree builders stop recursion
/// before that can happen.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DimensionChoice {
    /// Cycles through the axes, one per tree level. The previous level's
    /// axis is threaded through recursion per branch, so sibling subtrees
    /// cycle independently.
    Alternate,

    /// Uniformly random axis from the injected rng.
    Random,

    /// The axis with the largest population variance. Ties keep the earlier
    /// axis. The winning axis' mean is reported as an extra so the split
    /// strategy can reuse it.
    MaxVariance,

    /// The axis with the widest `max - min` interval. Ties keep the earlier
    /// axis. The winning axis' interval ends are reported as extras.
    WidestInterval,
}

/// Outcome of a dimension choice.
///
/// The optional fields carry values the winning scan already computed, so a
/// downstream split strategy does not recompute them. Each strategy
/// documents which fields it fills; absent fields simply force the consumer
/// to do its own scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DimensionPick {
    pub axis: AxisIndex,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DimensionPick {
    pub fn new(axis: AxisIndex) -> Self {
        Self {
            axis,
            mean: None,
            min: None,
            max: None,
        }
    }
}

impl DimensionChoice {
    pub fn select(
        &self,
        points: &[Vec<f64>],
        members: &[usize],
        dims: usize,
        last_axis: AxisIndex,
        rng: &mut fastrand::Rng,
    ) -> DimensionPick {
        debug_assert!(dims >= 1);
        debug_assert!(members.is_empty() == false);

        match self {
            Self::Alternate => DimensionPick::new((last_axis + 1) % dims),

            Self::Random => DimensionPick::new(rng.usize(0..dims)),

            Self::MaxVariance => {
                let (mut best_var, mut best_mean) = axis_variance(points, members, 0);
                let mut best_axis = 0;

                for axis in 1..dims {
                    let (var, mean) = axis_variance(points, members, axis);

                    if var > best_var {
                        best_var = var;
                        best_mean = mean;
                        best_axis = axis;
                    }
                }

                DimensionPick {
                    mean: Some(best_mean),
                    ..DimensionPick::new(best_axis)
                }
            }

            Self::WidestInterval => {
                let (mut best_min, mut best_max) = axis_interval(points, members, 0);
                let mut best_axis = 0;

                for axis in 1..dims {
                    let (min, max) = axis_interval(points, members, axis);

                    if max - min > best_max - best_min {
                        best_min = min;
                        best_max = max;
                        best_axis = axis;
                    }
                }

                DimensionPick {
                    min: Some(best_min),
                    max: Some(best_max),
                    ..DimensionPick::new(best_axis)
                }
            }
        }
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                      SPLIT POSITION CHOICE                                     */
/* ---------------------------------------------------------------------------------------------- */

/// Strategy which turns a chosen axis into a scalar split threshold.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SplitChoice {
    /// Arithmetic mean of the axis coordinates. Consumes `pick.mean` when
    /// the dimension strategy already computed it.
    Mean,

    /// The coordinate at index `len / 2` of the members sorted by the axis
    /// coordinate. Always a single element, never the averaged median.
    Median,

    /// Uniform draw from the axis' `[min, max)` interval. A degenerate
    /// interval collapses to `min`.
    Random,

    /// Midpoint of the axis interval. Consumes `pick.min`/`pick.max` when
    /// both are present.
    GeometricCenter,
}

impl SplitChoice {
    /// Chooses the split threshold along `axis`. The member list is never
    /// mutated; sorting happens on a local copy.
    pub fn select(
        &self,
        points: &[Vec<f64>],
        members: &[usize],
        axis: AxisIndex,
        pick: &DimensionPick,
        rng: &mut fastrand::Rng,
    ) -> f64 {
        debug_assert!(members.is_empty() == false);

        match self {
            Self::Mean => pick
                .mean
                .unwrap_or_else(|| axis_mean(points, members, axis)),

            Self::Median => {
                let sorted = { members.to_vec() }.tap_mut(|m| {
                    m.sort_by(|&a, &b| points[a][axis].total_cmp(&points[b][axis]))
                });

                points[sorted[sorted.len() / 2]][axis]
            }

            Self::Random => {
                let (min, max) = axis_interval(points, members, axis);
                min + rng.f64() * (max - min)
            }

            Self::GeometricCenter => match (pick.min, pick.max) {
                (Some(min), Some(max)) => (min + max) / 2.,
                _ => {
                    let (min, max) = axis_interval(points, members, axis);
                    (min + max) / 2.
                }
            },
        }
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                           SEED CHOICE                                          */
/* ---------------------------------------------------------------------------------------------- */

/// Strategy which picks the two representative points that bootstrap a
/// two-way grouping.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SeedChoice {
    /// Delegates axis selection to the configured [`DimensionChoice`], then
    /// seeds with the first point attaining the maximum and the first point
    /// attaining the minimum coordinate on that axis.
    OneDimFarthest,

    /// Full O(n²) scan for the pair with the largest euclidean distance
    /// over all axes. The first pair attaining the maximum wins.
    FarthestEucDistance,
}

/// Outcome of a seed choice: arena indices of both seeds, plus the chosen
/// axis when the strategy worked along a single one. Callers check the
/// axis' presence; there is no fake default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedPick {
    pub seeds: [usize; 2],
    pub axis: Option<AxisIndex>,
}

impl SeedChoice {
    pub fn select(
        &self,
        points: &[Vec<f64>],
        members: &[usize],
        dims: usize,
        dimension: &DimensionChoice,
        last_axis: AxisIndex,
        rng: &mut fastrand::Rng,
    ) -> SeedPick {
        debug_assert!(members.is_empty() == false);

        match self {
            Self::OneDimFarthest => {
                let axis = dimension.select(points, members, dims, last_axis, rng).axis;

                let mut max_at = members[0];
                let mut min_at = members[0];

                for &m in &members[1..] {
                    if points[m][axis] > points[max_at][axis] {
                        max_at = m;
                    }
                    if points[m][axis] < points[min_at][axis] {
                        min_at = m;
                    }
                }

                SeedPick {
                    seeds: [max_at, min_at],
                    axis: Some(axis),
                }
            }

            Self::FarthestEucDistance => {
                if members.len() == 1 {
                    // Degenerate singleton: the point seeds both slots.
                    return SeedPick {
                        seeds: [members[0]; 2],
                        axis: None,
                    };
                }

                let mut best = [members[0], members[1]];
                let mut best_dist = distance_sqr(&points[best[0]], &points[best[1]]);

                for (i, &a) in members.iter().enumerate() {
                    for &b in &members[i + 1..] {
                        let dist = distance_sqr(&points[a], &points[b]);

                        if dist > best_dist {
                            best_dist = dist;
                            best = [a, b];
                        }
                    }
                }

                SeedPick {
                    seeds: best,
                    axis: None,
                }
            }
        }
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                         GROUPING CHOICE                                        */
/* ---------------------------------------------------------------------------------------------- */

/// Strategy which assigns every member to exactly one of two seed-anchored
/// groups.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GroupingChoice {
    /// Each point joins the group of its strictly closest seed; ties
    /// (including points coincident with both seeds) go to group 2. Either
    /// group may come out empty on degenerate inputs.
    ClosestSeed,

    /// Sorts members by squared distance to seed 1 and cuts the sorted
    /// order in half: group 1 takes the first `n / 2` entries. Balanced
    /// within one element whenever `n >= 2`.
    SortingDistanceToOneSeed,
}

impl GroupingChoice {
    pub fn select(
        &self,
        points: &[Vec<f64>],
        members: &[usize],
        seed1: usize,
        seed2: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        match self {
            Self::ClosestSeed => {
                let mut group1 = Vec::new();
                let mut group2 = Vec::new();

                for &m in members {
                    let d1 = distance_sqr(&points[m], &points[seed1]);
                    let d2 = distance_sqr(&points[m], &points[seed2]);

                    if d1 < d2 {
                        group1.push(m);
                    } else {
                        group2.push(m);
                    }
                }

                (group1, group2)
            }

            Self::SortingDistanceToOneSeed => {
                let mut group1 = { members.to_vec() }.tap_mut(|m| {
                    m.sort_by(|&a, &b| {
                        distance_sqr(&points[a], &points[seed1])
                            .total_cmp(&distance_sqr(&points[b], &points[seed1]))
                    })
                });

                let group2 = group1.split_off(group1.len() / 2);
                (group1, group2)
            }
        }
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                         NAME BOUNDARY                                          */
/* ---------------------------------------------------------------------------------------------- */

// Runtime configuration by name stays available at the boundary; everything
// past `FromStr` dispatches on the closed enums above.

impl FromStr for DimensionChoice {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "alternate" => Self::Alternate,
            "random" => Self::Random,
            "max_variance" => Self::MaxVariance,
            "widest_interval" => Self::WidestInterval,
            _ => return Err(BuildError::unknown_strategy("dimension", s)),
        })
    }
}

impl FromStr for SplitChoice {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mean" => Self::Mean,
            "median" => Self::Median,
            "random" => Self::Random,
            "geometric_center" => Self::GeometricCenter,
            _ => return Err(BuildError::unknown_strategy("split position", s)),
        })
    }
}

impl FromStr for SeedChoice {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "one_dim_farthest" => Self::OneDimFarthest,
            "farthest_euc_distance" => Self::FarthestEucDistance,
            _ => return Err(BuildError::unknown_strategy("seed", s)),
        })
    }
}

impl FromStr for GroupingChoice {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "closest_seed" => Self::ClosestSeed,
            "sorting_distance_to_one_seed" => Self::SortingDistanceToOneSeed,
            _ => return Err(BuildError::unknown_strategy("grouping", s)),
        })
    }
}

/* ---------------------------------------- Axis Scans ------------------------------------------ */

fn axis_mean(points: &[Vec<f64>], members: &[usize], axis: AxisIndex) -> f64 {
    let sum: f64 = members.iter().map(|&m| points[m][axis]).sum();
    sum / members.len() as f64
}

fn axis_variance(points: &[Vec<f64>], members: &[usize], axis: AxisIndex) -> (f64, f64) {
    let mean = axis_mean(points, members, axis);

    let sum_sqr: f64 = members
        .iter()
        .map(|&m| {
            let d = points[m][axis] - mean;
            d * d
        })
        .sum();

    (sum_sqr / members.len() as f64, mean)
}

fn axis_interval(points: &[Vec<f64>], members: &[usize], axis: AxisIndex) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &m in members {
        min = min.min(points[m][axis]);
        max = max.max(points[m][axis]);
    }

    (min, max)
}

/* ---------------------------------------------------------------------------------------------- */
/*                                              TESTS                                             */
/* ---------------------------------------------------------------------------------------------- */

#[cfg(test)]
mod __test;
