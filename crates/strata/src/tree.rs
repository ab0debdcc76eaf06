pub mod axis;
pub mod flatten;
pub mod group;

use crate::strategy::{DimensionChoice, GroupingChoice, SeedChoice, SplitChoice};

/* ---------------------------------------------------------------------------------------------- */
/*                                       BUILD PARAMETERS                                         */
/* ---------------------------------------------------------------------------------------------- */

/// Construction parameters shared by both tree families.
///
/// The axis-splitting tree consumes `dimension` and `split_position`; the
/// bounding-group tree consumes `seeds`, `grouping`, and (through
/// [`SeedChoice::OneDimFarthest`]) `dimension` as well. Fields that a tree
/// does not consume are simply ignored by its builder.
///
/// Tree depth is hard-capped at 65,535 levels.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BuildParameter {
    /// Maximum number of points a node may hold before recursion stops and
    /// the node becomes terminal. Must be at least 1.
    pub leaf_size: u32,

    /// Optional depth bound. A node at this depth is terminal regardless of
    /// its population. `Some(0)` is rejected at build time; `None` leaves
    /// the depth unbounded.
    pub max_depth: Option<u16>,

    /// Axis selection strategy.
    pub dimension: DimensionChoice,

    /// Split threshold strategy (axis-splitting tree only).
    pub split_position: SplitChoice,

    /// Seed pair strategy (bounding-group tree only).
    pub seeds: SeedChoice,

    /// Two-way grouping strategy (bounding-group tree only).
    pub grouping: GroupingChoice,

    /// Seed for the rng behind the randomized strategies. `None` draws a
    /// fresh state per build; pin it for reproducible trees.
    pub rng_seed: Option<u64>,
}

impl Default for BuildParameter {
    fn default() -> Self {
        Self {
            leaf_size: 10,
            max_depth: None,
            dimension: DimensionChoice::Random,
            split_position: SplitChoice::Random,
            seeds: SeedChoice::OneDimFarthest,
            grouping: GroupingChoice::ClosestSeed,
            rng_seed: None,
        }
    }
}

impl BuildParameter {
    pub fn with(mut self, visit: impl FnOnce(&mut Self)) -> Self {
        visit(&mut self);
        self
    }

    pub(crate) fn validate(&self, dims: usize) -> Result<(), BuildError> {
        if dims == 0 {
            return Err(BuildError::InvalidParameter { name: "dims" });
        }
        if self.leaf_size == 0 {
            return Err(BuildError::InvalidParameter { name: "leaf_size" });
        }
        if self.max_depth == Some(0) {
            return Err(BuildError::InvalidParameter { name: "max_depth" });
        }

        Ok(())
    }

    pub(crate) fn rng(&self) -> fastrand::Rng {
        match self.rng_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }

    /// Common stop condition of both recursive builders.
    pub(crate) fn is_terminal(&self, len: usize, depth: u16) -> bool {
        len <= self.leaf_size as usize || self.max_depth.is_some_and(|max| depth >= max)
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                             ERRORS                                             */
/* ---------------------------------------------------------------------------------------------- */

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// An unrecognized strategy name reached the string boundary. Surfaced
    /// before any build work starts.
    #[error("unknown {kind} strategy `{name}`")]
    UnknownStrategy { kind: &'static str, name: String },

    /// The bounding-group tree has no defined root over zero points.
    #[error("cannot build a bounding-group tree over an empty point set")]
    EmptyInput,

    /// A point's coordinate count disagrees with the configured dimension.
    #[error("point {index} has {actual} coordinate(s), expected {expected}")]
    DimensionMismatch {
        index: usize,
        actual: usize,
        expected: usize,
    },

    /// A construction parameter that must be positive was zero.
    #[error("`{name}` must be positive")]
    InvalidParameter { name: &'static str },
}

impl BuildError {
    pub(crate) fn unknown_strategy(kind: &'static str, name: &str) -> Self {
        Self::UnknownStrategy {
            kind,
            name: name.to_owned(),
        }
    }
}

/// Checked once at build entry; the recursion bodies never re-validate.
pub(crate) fn validate_points(points: &[Vec<f64>], dims: usize) -> Result<(), BuildError> {
    for (index, point) in points.iter().enumerate() {
        if point.len() != dims {
            return Err(BuildError::DimensionMismatch {
                index,
                actual: point.len(),
                expected: dims,
            });
        }
    }

    Ok(())
}

/* ---------------------------------------------------------------------------------------------- */
/*                                              TESTS                                             */
/* ---------------------------------------------------------------------------------------------- */
