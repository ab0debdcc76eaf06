use super::{validate_points, BuildError, BuildParameter};
use crate::primitive::{Aabb, AxisIndex};
use crate::tree::flatten::Flattened;

/* ---------------------------------------------------------------------------------------------- */
/*                                      BOUNDING GROUP TREE                                       */
/* ---------------------------------------------------------------------------------------------- */

/// Bounding-box grouping tree built once over an immutable point set. Every
/// node carries the exact bounds and the full member list of its subtree;
/// `children == None` marks a leaf.
#[derive(Debug)]
pub struct GroupTree {
    dims: usize,
    points: Vec<Vec<f64>>,
    root: GroupNode,
}

/// Unlike the axis-splitting tree, a node is never entirely absent: even a
/// group that received zero points gets a node (with the sentinel bbox and
/// no children).
#[derive(Debug)]
pub struct GroupNode {
    pub depth: u16,
    pub bound: Aabb,

    /// Every point under this node, not just the direct remainder: a point
    /// shows up in each ancestor on its path plus exactly one leaf.
    pub members: Vec<usize>,

    pub children: Option<Box<GroupChildren>>,
}

#[derive(Debug)]
pub struct GroupChildren {
    pub left: GroupNode,
    pub right: GroupNode,
}

impl GroupTree {
    /// Builds the tree. Zero points leave the root bbox undefined, which is
    /// an [`BuildError::EmptyInput`] error here rather than a null tree.
    pub fn build(
        points: Vec<Vec<f64>>,
        dims: usize,
        params: &BuildParameter,
    ) -> Result<Self, BuildError> {
        params.validate(dims)?;
        validate_points(&points, dims)?;

        if points.is_empty() {
            return Err(BuildError::EmptyInput);
        }

        let members: Vec<usize> = (0..points.len()).collect();
        let bound = Aabb::over(&points, &members, dims);

        let mut ctx = BuildContext {
            points: &points,
            dims,
            params,
            rng: params.rng(),
        };

        let children = recurse_build(&mut ctx, &members, 1, 0);

        Ok(Self {
            dims,
            points,
            root: GroupNode {
                depth: 0,
                bound,
                members,
                children,
            },
        })
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

    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    /// Lazy depth-first `(point, label)` sequence. See [`Flattened`] for
    /// the labeling scheme.
    pub fn flatten(&self) -> Flattened<'_> {
        Flattened::from_group(self)
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

/// Returns the child pair of the node currently held by the caller, or
/// `None` when that node is terminal.
fn recurse_build(
    ctx: &mut BuildContext,
    members: &[usize],
    depth: u16,
    last_axis: AxisIndex,
) -> Option<Box<GroupChildren>> {
    if ctx.params.is_terminal(members.len(), depth) {
        return None;
    }

    let pick = ctx.params.seeds.select(
        ctx.points,
        members,
        ctx.dims,
        &ctx.params.dimension,
        last_axis,
        &mut ctx.rng,
    );

    let (group1, group2) =
        ctx.params
            .grouping
            .select(ctx.points, members, pick.seeds[0], pick.seeds[1]);

    // Seed strategies that worked along one axis report it so `Alternate`
    // keeps cycling below; otherwise the previous axis carries over.
    let next_axis = pick.axis.unwrap_or(last_axis);

    // One group swallowing the whole set cannot shrink on recursion; both
    // sides terminate right here in that case.
    let no_shrink = group1.is_empty() || group2.is_empty();

    let left = make_child(ctx, group1, depth, next_axis, no_shrink);
    let right = make_child(ctx, group2, depth, next_axis, no_shrink);

    Some(Box::new(GroupChildren { left, right }))
}

fn make_child(
    ctx: &mut BuildContext,
    members: Vec<usize>,
    depth: u16,
    last_axis: AxisIndex,
    force_leaf: bool,
) -> GroupNode {
    // An empty group keeps the sentinel bbox.
    let bound = Aabb::over(ctx.points, &members, ctx.dims);

    let children = if force_leaf || members.is_empty() {
        None
    } else {
        recurse_build(ctx, &members, depth + 1, last_axis)
    };

    GroupNode {
        depth,
        bound,
        members,
        children,
    }
}

static_assertions::assert_impl_all!(GroupTree: Send, Sync);
