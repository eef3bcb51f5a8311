//! Borrowed lookup tables over a member slice.
//!
//! Every engine operation needs two lookups: "which row owns this id" and
//! "which rows name this id as their manager". [`MemberIndex`] builds both in
//! one pass so batch callers can run many queries against one snapshot
//! without rebuilding them.
//!
//! # Duplicate ids
//!
//! Ids are expected to be unique. When they are not, the **later** row owns
//! the id for manager resolution; earlier rows with the same id never gain
//! children.

use std::collections::{HashMap, HashSet};

use crate::model::{Member, MemberId};

/// Lookup tables for one member snapshot.
#[derive(Debug, Clone)]
pub struct MemberIndex<'a> {
    members: &'a [Member],
    by_id: HashMap<MemberId, usize>,
    reports: HashMap<MemberId, Vec<usize>>,
}

impl<'a> MemberIndex<'a> {
    /// Index `members`. O(n) time and space.
    #[must_use]
    pub fn new(members: &'a [Member]) -> Self {
        let mut by_id: HashMap<MemberId, usize> = HashMap::with_capacity(members.len());
        let mut reports: HashMap<MemberId, Vec<usize>> = HashMap::new();

        for (pos, member) in members.iter().enumerate() {
            by_id.insert(member.id, pos);
            if let Some(manager_id) = member.manager_id {
                reports.entry(manager_id).or_default().push(pos);
            }
        }

        Self {
            members,
            by_id,
            reports,
        }
    }

    /// The indexed rows, in input order.
    #[must_use]
    pub const fn members(&self) -> &'a [Member] {
        self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Row that owns `id`, if any.
    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<&'a Member> {
        self.position(id).map(|pos| &self.members[pos])
    }

    #[must_use]
    pub fn contains(&self, id: MemberId) -> bool {
        self.by_id.contains_key(&id)
    }

    #[must_use]
    pub fn position(&self, id: MemberId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Positions of every row whose `manager_id` equals `id`, in input order.
    ///
    /// Matches on the raw reference: `id` need not be present as a row.
    #[must_use]
    pub fn report_positions(&self, id: MemberId) -> &[usize] {
        self.reports.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Tree children of the row at `pos`: its reports when this row owns its
    /// id, nothing otherwise.
    pub(crate) fn child_positions(&self, pos: usize) -> &[usize] {
        let id = self.members[pos].id;
        if self.position(id) == Some(pos) {
            self.report_positions(id)
        } else {
            &[]
        }
    }

    /// Position of the manager row for the row at `pos`, or `None` when the
    /// row is unmanaged or its reference dangles.
    pub(crate) fn resolved_manager(&self, pos: usize) -> Option<usize> {
        self.members[pos]
            .manager_id
            .and_then(|manager_id| self.position(manager_id))
    }

    /// Walk the management chain upward from `start`.
    #[must_use]
    pub fn climb(&self, start: MemberId) -> Climb<'_, 'a> {
        Climb {
            index: self,
            current: self.get(start),
            visited: HashSet::new(),
            cycle_detected: false,
        }
    }
}

/// Upward walk along `manager_id` references.
///
/// Yields the `manager_id` of each row on the chain, starting with the start
/// row's own manager. The walk ends after a root, after a reference that
/// resolves to no row (the dangling id is still yielded), or when a row is
/// reached a second time. The last case sets [`Climb::cycle_detected`], so
/// the walk terminates on cyclic data.
#[derive(Debug)]
pub struct Climb<'i, 'a> {
    index: &'i MemberIndex<'a>,
    current: Option<&'a Member>,
    visited: HashSet<MemberId>,
    cycle_detected: bool,
}

impl Climb<'_, '_> {
    /// `true` once the walk stopped on a revisited row.
    #[must_use]
    pub const fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }
}

impl Iterator for Climb<'_, '_> {
    type Item = MemberId;

    fn next(&mut self) -> Option<MemberId> {
        let current = self.current?;
        let Some(manager_id) = current.manager_id else {
            self.current = None;
            return None;
        };

        if !self.visited.insert(current.id) {
            self.cycle_detected = true;
            self.current = None;
            return None;
        }

        self.current = self.index.get(manager_id);
        Some(manager_id)
    }
}
