use enum_as_inner::EnumAsInner;

use super::{validate_points, BuildError, BuildParameter};
use crate::primitive::AxisIndex;
use crate::tree::flatten::Flattened;

/* ---------------------------------------------------------------------------------------------- */
/*                                       AXIS SPLITTING TREE                                      */
/* ---------------------------------------------------------------------------------------------- */

/// Axis-aligned binary splitting tree built once over an immutable point
/// set. Nodes partition arena indices by a single-axis threshold; the tree
/// is read-only after construction.
#[derive(Debug)]
pub struct AxisTree {
    dims: usize,
    points: Vec<Vec<f64>>,
    root: Option<AxisNode>,
}

#[derive(Debug, EnumAsInner)]
pub enum AxisNode {
    Split(AxisSplit),
    Leaf(AxisLeaf),
}

/// Interior node. A `None` child slot means that partition received zero
/// points; that is an allowed terminal state, not an error.
#[derive(Debug)]
pub struct AxisSplit {
    pub depth: u16,
    pub axis: AxisIndex,
    pub value: f64,

    /// Points with `point[axis] < value`, exclusively owned.
    pub minus: Option<Box<AxisNode>>,
    /// Points with `point[axis] >= value`; the boundary value itself always
    /// routes here.
    pub plus: Option<Box<AxisNode>>,
}

#[derive(Debug)]
pub struct AxisLeaf {
    pub depth: u16,
    pub members: Vec<usize>,
}

impl AxisTree {
    /// Builds the tree. Every point must carry exactly `dims` coordinates;
    /// an empty input yields a tree whose root is `None` rather than an
    /// error.
    pub fn build(
        points: Vec<Vec<f64>>,
        dims: usize,
        params: &BuildParameter,
    ) -> Result<Self, BuildError> {
        params.validate(dims)?;
        validate_points(&points, dims)?;

        let root = (points.is_empty() == false).then(|| {
            let mut ctx = BuildContext {
                points: &points,
                dims,
                params,
                rng: params.rng(),
            };

            recurse_build(&mut ctx, (0..points.len()).collect(), 0, 0)
        });

        Ok(Self { dims, points, root })
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn point(&self, index: usize) -> &[f64] {
        &self.points[index]
    }

    pub fn root(&self) -> Option<&AxisNode> {
        self.root.as_ref()
    }

    /// Lazy depth-first `(point, label)` sequence. See [`Flattened`] for
    /// the labeling scheme.
    pub fn flatten(&self) -> Flattened<'_> {
        Flattened::from_axis(self)
    }

    /// Flattens into parallel point/label columns for metric consumers.
    pub fn labeled_points(&self) -> (Vec<&[f64]>, Vec<u32>) {
        self.flatten().unzip()
    }
}

/* ---------------------------------------- Build Recursion ------------------------------------- */

struct BuildContext<'a> {
    points: &'a [Vec<f64>],
    dims: usize,
    params: &'a BuildParameter,
    rng: fastrand::Rng,
}

fn recurse_build(
    ctx: &mut BuildContext,
    members: Vec<usize>,
    depth: u16,
    last_axis: AxisIndex,
) -> AxisNode {
    if ctx.params.is_terminal(members.len(), depth) {
        return AxisNode::Leaf(AxisLeaf { depth, members });
    }

    let pick = ctx
        .params
        .dimension
        .select(ctx.points, &members, ctx.dims, last_axis, &mut ctx.rng);
    let value = ctx
        .params
        .split_position
        .select(ctx.points, &members, pick.axis, &pick, &mut ctx.rng);

    // Stable sort on the split axis keeps insertion order within each side.
    let mut sorted = members;
    sorted.sort_by(|&a, &b| ctx.points[a][pick.axis].total_cmp(&ctx.points[b][pick.axis]));

    let cut = sorted.partition_point(|&m| ctx.points[m][pick.axis] < value);
    let plus = sorted.split_off(cut);
    let minus = sorted;

    if minus.is_empty() || plus.is_empty() {
        // The split failed to shrink the set; a deterministic strategy
        // would reproduce the same boundary forever, so the surviving side
        // terminates one level down and the empty slot stays `None`.
        let capped = |members: Vec<usize>| {
            (members.is_empty() == false).then(|| {
                Box::new(AxisNode::Leaf(AxisLeaf {
                    depth: depth + 1,
                    members,
                }))
            })
        };

        return AxisNode::Split(AxisSplit {
            depth,
            axis: pick.axis,
            value,
            minus: capped(minus),
            plus: capped(plus),
        });
    }

    AxisNode::Split(AxisSplit {
        depth,
        axis: pick.axis,
        value,
        minus: Some(Box::new(recurse_build(ctx, minus, depth + 1, pick.axis))),
        plus: Some(Box::new(recurse_build(ctx, plus, depth + 1, pick.axis))),
    })
}

static_assertions::assert_impl_all!(AxisTree: Send, Sync);
