/* ---------------------------------------------------------------------------------------------- */
/*                                           PRIMITIVES                                           */
/* ---------------------------------------------------------------------------------------------- */

pub type AxisIndex = usize;

/// Squared euclidean distance between two coordinate slices.
///
/// Both slices MUST have the same length; trees validate this once at build
/// entry, so the hot path only carries a debug check.
pub fn distance_sqr(a: &[f64], b: &[f64]) -> f64 {
    debug_assert!(a.len() == b.len());

    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/* ---------------------------------------------------------------------------------------------- */
/*                                        AABB RECTANGLE                                          */
/* ---------------------------------------------------------------------------------------------- */

/// Axis-aligned bounding box over a runtime number of dimensions.
///
/// The box of an empty point set is the sentinel (`min = +inf`,
/// `max = -inf` on every axis); extending the sentinel with any point
/// yields that point's degenerate box.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl Aabb {
    pub fn sentinel(dims: usize) -> Self {
        Self {
            min: vec![f64::INFINITY; dims],
            max: vec![f64::NEG_INFINITY; dims],
        }
    }

    /// Exact component-wise bounds over `members`, an index list into the
    /// point arena.
    pub fn over(points: &[Vec<f64>], members: &[usize], dims: usize) -> Self {
        let mut bound = Self::sentinel(dims);

        for &m in members {
            bound.extend(&points[m]);
        }

        bound
    }

    pub fn extend(&mut self, point: &[f64]) {
        debug_assert!(point.len() == self.min.len());

        for i in 0..self.min.len() {
            self.min[i] = self.min[i].min(point[i]);
            self.max[i] = self.max[i].max(point[i]);
        }
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    pub fn dims(&self) -> usize {
        self.min.len()
    }

    /// True for the sentinel box, i.e. no point has been folded in.
    pub fn is_empty(&self) -> bool {
        (0..self.min.len()).any(|i| self.min[i] > self.max[i])
    }

    /// Closed containment on every axis.
    pub fn contains(&self, point: &[f64]) -> bool {
        debug_assert!(point.len() == self.min.len());

        for i in 0..self.min.len() {
            if point[i] < self.min[i] || self.max[i] < point[i] {
                return false;
            }
        }
        true
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                              TESTS                                             */
/* ---------------------------------------------------------------------------------------------- */
