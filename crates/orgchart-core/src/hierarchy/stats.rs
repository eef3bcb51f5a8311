//! Summary statistics for a member snapshot.
//!
//! # Statistics Provided
//!
//! - **member_count**: rows in the snapshot.
//! - **root_count**: trees in the built forest (unmanaged rows plus rows
//!   whose manager is missing).
//! - **dangling_count**: rows whose `manager_id` names a missing row.
//! - **max_depth**: levels in the deepest tree; 0 for an empty snapshot.
//! - **max_span**: the largest number of direct reports held by one row.
//! - **cyclic_member_count**: rows unreachable from any root because they
//!   sit on, or under, a manager cycle.

use serde::Serialize;

use crate::hierarchy::index::MemberIndex;
use crate::model::Member;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    pub member_count: usize,
    pub root_count: usize,
    pub dangling_count: usize,
    pub max_depth: usize,
    pub max_span: usize,
    pub cyclic_member_count: usize,
}

impl HierarchyStats {
    #[must_use]
    pub fn from_members(members: &[Member]) -> Self {
        let index = MemberIndex::new(members);
        let roots = index.build_tree();

        let dangling_count = members
            .iter()
            .filter(|m| m.manager_id.is_some_and(|id| !index.contains(id)))
            .count();

        let mut reachable = 0usize;
        let mut max_depth = 0usize;
        let mut max_span = 0usize;
        for (depth, node) in roots.iter().flat_map(|root| root.walk()) {
            reachable += 1;
            max_depth = max_depth.max(depth + 1);
            max_span = max_span.max(node.children.len());
        }

        Self {
            member_count: members.len(),
            root_count: roots.len(),
            dangling_count,
            max_depth,
            max_span,
            cyclic_member_count: members.len() - reachable,
        }
    }
}
