//! Cycle safety for proposed reparent edits, and cycle diagnostics.
//!
//! # Write-path contract
//!
//! Setting `member.manager_id = new_manager` closes a loop exactly when
//! `new_manager` is `member` itself or sits somewhere in `member`'s reporting
//! line, i.e. when walking upward from `new_manager` reaches `member`.
//! Any caller that persists a new `manager_id` must run
//! [`would_create_cycle`] (or [`check_reparent`]) first and refuse the write
//! on a positive answer. Nothing else in the engine keeps the stored
//! relation a forest.
//!
//! # Corrupted input
//!
//! If the upward walk from `new_manager` enters an existing loop that does
//! not contain `member`, the walk stops and the edit is reported safe: it
//! does not put `member` on a loop. [`find_manager_cycles`] lists the loops
//! that are already stored.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::HierarchyError;
use crate::hierarchy::index::MemberIndex;
use crate::model::{Member, MemberId};

/// Outcome of validating a proposed reparent edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ReparentCheck {
    /// The edit keeps the relation acyclic.
    Safe,
    /// The member was proposed as its own manager.
    SelfLoop,
    /// The proposed manager reports (transitively) to the member.
    ///
    /// `path` runs from the member down to the proposed manager; the edit
    /// would close it into a loop.
    Cycle { path: Vec<MemberId> },
}

impl ReparentCheck {
    /// `true` for [`ReparentCheck::Safe`].
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    /// The error a writer should surface for a rejected edit; `None` when
    /// the edit is safe.
    #[must_use]
    pub fn into_error(self, member: MemberId, new_manager: MemberId) -> Option<HierarchyError> {
        let path = match self {
            Self::Safe => return None,
            Self::SelfLoop => vec![member],
            Self::Cycle { path } => path,
        };
        Some(HierarchyError::CycleDetected {
            member,
            proposed_manager: new_manager,
            path,
        })
    }
}

/// `true` iff setting `member`'s manager to `new_manager` would create a
/// cycle.
///
/// Either `member == new_manager`, or `new_manager`'s existing chain (walked
/// upward via `manager_id`) reaches `member`.
#[must_use]
pub fn would_create_cycle(members: &[Member], member: MemberId, new_manager: MemberId) -> bool {
    MemberIndex::new(members).would_create_cycle(member, new_manager)
}

/// Explanatory form of [`would_create_cycle`].
#[must_use]
pub fn check_reparent(members: &[Member], member: MemberId, new_manager: MemberId) -> ReparentCheck {
    MemberIndex::new(members).check_reparent(member, new_manager)
}

/// Every row other than `member` that could become its manager without
/// creating a cycle, in input order.
#[must_use]
pub fn eligible_managers(members: &[Member], member: MemberId) -> Vec<&Member> {
    MemberIndex::new(members).eligible_managers(member)
}

/// Manager cycles already present in `members`.
///
/// Each entry is the sorted list of ids in one loop (a strongly connected
/// component of the member → manager relation). A row managing itself is
/// reported as a one-element loop. Entries are sorted.
#[instrument(level = "debug", skip(members), fields(members = members.len()))]
#[must_use]
pub fn find_manager_cycles(members: &[Member]) -> Vec<Vec<MemberId>> {
    let index = MemberIndex::new(members);
    let mut graph = DiGraph::<MemberId, ()>::with_capacity(members.len(), members.len());
    let mut nodes: HashMap<MemberId, NodeIndex> = HashMap::with_capacity(members.len());

    for member in members {
        nodes
            .entry(member.id)
            .or_insert_with(|| graph.add_node(member.id));
    }

    for (pos, member) in members.iter().enumerate() {
        let Some(manager_pos) = index.resolved_manager(pos) else {
            continue;
        };
        let from = nodes[&member.id];
        let to = nodes[&members[manager_pos].id];
        if !graph.contains_edge(from, to) {
            graph.add_edge(from, to, ());
        }
    }

    let mut cycles: Vec<Vec<MemberId>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&node| graph.find_edge(node, node).is_some())
        })
        .map(|component| {
            let mut ids: Vec<MemberId> = component.into_iter().map(|idx| graph[idx]).collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

impl<'a> MemberIndex<'a> {
    /// Indexed form of [`would_create_cycle`].
    #[must_use]
    pub fn would_create_cycle(&self, member: MemberId, new_manager: MemberId) -> bool {
        if member == new_manager {
            return true;
        }
        let mut climb = self.climb(new_manager);
        let found = climb.any(|id| id == member);
        if !found && climb.cycle_detected() {
            debug!(%member, %new_manager, "proposed manager's chain already loops elsewhere");
        }
        found
    }

    /// Indexed form of [`check_reparent`].
    #[must_use]
    pub fn check_reparent(&self, member: MemberId, new_manager: MemberId) -> ReparentCheck {
        if member == new_manager {
            return ReparentCheck::SelfLoop;
        }

        let mut path = vec![new_manager];
        for id in self.climb(new_manager) {
            path.push(id);
            if id == member {
                path.reverse();
                debug!(%member, %new_manager, depth = path.len(), "reparent rejected");
                return ReparentCheck::Cycle { path };
            }
        }

        ReparentCheck::Safe
    }

    /// Indexed form of [`eligible_managers`].
    #[must_use]
    pub fn eligible_managers(&self, member: MemberId) -> Vec<&'a Member> {
        self.members()
            .iter()
            .filter(|candidate| {
                candidate.id != member && !self.would_create_cycle(member, candidate.id)
            })
            .collect()
    }
}
