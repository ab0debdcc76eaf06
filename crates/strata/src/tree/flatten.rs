use super::axis::{AxisNode, AxisTree};
use super::group::{GroupNode, GroupTree};

/* ---------------------------------------------------------------------------------------------- */
/*                                           FLATTENER                                            */
/* ---------------------------------------------------------------------------------------------- */

/// Lazy depth-first `(point, label)` sequence over a built tree.
///
/// A leaf yields its points tagged with the running label; an interior node
/// hands `label` to its minus/left branch and `label + 1` to its plus/right
/// branch. Labels are therefore NOT globally unique: unrelated leaves in
/// different subtrees can coincidentally share a number. Consumers treat
/// them as opaque cluster tags; flattening the same tree twice yields the
/// identical sequence.
pub struct Flattened<'a> {
    points: &'a [Vec<f64>],
    stack: Vec<(Frame<'a>, u32)>,
    drain: Option<(std::slice::Iter<'a, usize>, u32)>,
}

enum Frame<'a> {
    Axis(&'a AxisNode),
    Group(&'a GroupNode),
}

impl<'a> Flattened<'a> {
    pub(crate) fn from_axis(tree: &'a AxisTree) -> Self {
        Self {
            points: tree.points(),
            stack: tree
                .root()
                .map(|root| (Frame::Axis(root), 0))
                .into_iter()
                .collect(),
            drain: None,
        }
    }

    pub(crate) fn from_group(tree: &'a GroupTree) -> Self {
        Self {
            points: tree.points(),
            stack: vec![(Frame::Group(tree.root()), 0)],
            drain: None,
        }
    }
}

impl<'a> Iterator for Flattened<'a> {
    type Item = (&'a [f64], u32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((members, label)) = &mut self.drain {
                if let Some(&m) = members.next() {
                    return Some((&self.points[m], *label));
                }
                self.drain = None;
            }

            let (frame, label) = self.stack.pop()?;

            match frame {
                Frame::Axis(AxisNode::Leaf(leaf)) => {
                    self.drain = Some((leaf.members.iter(), label));
                }

                Frame::Axis(AxisNode::Split(split)) => {
                    // Plus goes on the stack first so minus pops first.
                    if let Some(plus) = &split.plus {
                        self.stack.push((Frame::Axis(plus), label + 1));
                    }
                    if let Some(minus) = &split.minus {
                        self.stack.push((Frame::Axis(minus), label));
                    }
                }

                Frame::Group(node) => match &node.children {
                    Some(children) => {
                        self.stack.push((Frame::Group(&children.right), label + 1));
                        self.stack.push((Frame::Group(&children.left), label));
                    }
                    None => {
                        self.drain = Some((node.members.iter(), label));
                    }
                },
            }
        }
    }
}
