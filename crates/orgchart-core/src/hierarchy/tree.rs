//! Reconstruction of the management forest from flat member rows.
//!
//! # Root classification
//!
//! A row is a root when its `manager_id` is `None` **or** names an id that
//! no row in the snapshot owns. Resolving a dangling reference to "root"
//! keeps the read path total when the caller passes a partial or stale
//! snapshot.
//!
//! # Ordering
//!
//! Roots and children keep the relative order of the input slice. Nothing is
//! sorted.
//!
//! # Corrupted input
//!
//! Rows on a manager cycle (and rows hanging beneath one) are not reachable
//! from any root, so they do not appear in the output. The omission is
//! reported through `tracing` rather than an error.

use serde::Serialize;
use tracing::{instrument, warn};

use crate::hierarchy::index::MemberIndex;
use crate::model::{Member, MemberId};

/// A member together with its direct reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub member: Member,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.member.id
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.walk().count()
    }

    /// Number of levels in this subtree. A leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(1)
    }

    /// Pre-order traversal yielding `(depth, node)`, with `self` at depth 0.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

/// Pre-order iterator over a [`TreeNode`] subtree.
#[derive(Debug)]
pub struct Walk<'t> {
    stack: Vec<(usize, &'t TreeNode)>,
}

impl<'t> Iterator for Walk<'t> {
    type Item = (usize, &'t TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Build the management forest for `members`.
///
/// Returns the root nodes, each populated with its reports recursively.
/// O(n) time and space. See the module docs for root and ordering rules.
#[must_use]
pub fn build_hierarchy_tree(members: &[Member]) -> Vec<TreeNode> {
    MemberIndex::new(members).build_tree()
}

impl MemberIndex<'_> {
    /// Indexed form of [`build_hierarchy_tree`].
    #[instrument(level = "debug", skip(self), fields(members = self.len()))]
    #[must_use]
    pub fn build_tree(&self) -> Vec<TreeNode> {
        let members = self.members();
        let root_positions: Vec<usize> = (0..members.len())
            .filter(|&pos| self.resolved_manager(pos).is_none())
            .collect();

        // Children are assembled before their parent (post-order), so nodes
        // can be moved into place without recursion.
        let mut built: Vec<Option<TreeNode>> = (0..members.len()).map(|_| None).collect();
        let mut stack: Vec<(usize, bool)> = root_positions.iter().rev().map(|&p| (p, false)).collect();
        let mut placed = 0usize;

        while let Some((pos, expanded)) = stack.pop() {
            if expanded {
                let children = self
                    .child_positions(pos)
                    .iter()
                    .filter_map(|&child| built[child].take())
                    .collect();
                built[pos] = Some(TreeNode {
                    member: members[pos].clone(),
                    children,
                });
                placed += 1;
            } else {
                stack.push((pos, true));
                stack.extend(self.child_positions(pos).iter().rev().map(|&c| (c, false)));
            }
        }

        let omitted = members.len() - placed;
        if omitted > 0 {
            warn!(omitted, "member rows unreachable from any root (manager cycle)");
        }

        root_positions
            .into_iter()
            .filter_map(|pos| built[pos].take())
            .collect()
    }
}
