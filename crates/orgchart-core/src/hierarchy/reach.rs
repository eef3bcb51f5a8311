//! Reachability queries over the management relation.
//!
//! - [`is_manager_of`]: is A above B on B's management chain?
//! - [`get_subordinate_ids`]: everyone transitively reporting to A.
//! - [`ancestor_ids`]: B's chain from immediate manager to root.
//! - [`direct_reports`] / [`manager_of`]: one step down / up.
//!
//! Every walk carries a visited-id guard, so all of these terminate on
//! corrupted (cyclic) snapshots. On a cycle the walk simply stops; nothing
//! is raised.

use std::collections::HashSet;

use tracing::debug;

use crate::hierarchy::index::MemberIndex;
use crate::model::{Member, MemberId, UserId};

/// `true` iff `manager` appears on `target`'s management chain.
///
/// The chain is walked upward from `target` one `manager_id` at a time and
/// ends at a root, a dangling reference, or a revisited id (returns `false`).
/// An unknown `target` has no chain.
#[must_use]
pub fn is_manager_of(members: &[Member], manager: MemberId, target: MemberId) -> bool {
    MemberIndex::new(members).is_manager_of(manager, target)
}

/// User ids of every member transitively reporting to `member`.
///
/// Order is pre-order depth-first: each direct report (in input order)
/// followed by that report's own reports. `member` need not exist as a row;
/// its reports are found by `manager_id` equality.
///
/// An id that reappears (only possible on cyclic data) is not expanded
/// again, so each reachable row contributes at most once and the call always
/// terminates.
#[must_use]
pub fn get_subordinate_ids(members: &[Member], member: MemberId) -> Vec<UserId> {
    MemberIndex::new(members).subordinate_ids(member)
}

/// Ids on `member`'s management chain, immediate manager first.
///
/// Stops before a dangling reference and at the first repeated id.
#[must_use]
pub fn ancestor_ids(members: &[Member], member: MemberId) -> Vec<MemberId> {
    MemberIndex::new(members).ancestor_ids(member)
}

/// Rows whose `manager_id` is `member`, in input order.
#[must_use]
pub fn direct_reports(members: &[Member], member: MemberId) -> Vec<&Member> {
    let index = MemberIndex::new(members);
    index
        .report_positions(member)
        .iter()
        .map(|&pos| &members[pos])
        .collect()
}

/// The row `member` reports to; `None` for roots, dangling references and
/// unknown members.
#[must_use]
pub fn manager_of(members: &[Member], member: MemberId) -> Option<&Member> {
    let index = MemberIndex::new(members);
    let pos = index.position(member)?;
    index.resolved_manager(pos).map(|manager| &members[manager])
}

impl<'a> MemberIndex<'a> {
    /// Indexed form of [`is_manager_of`].
    #[must_use]
    pub fn is_manager_of(&self, manager: MemberId, target: MemberId) -> bool {
        let mut climb = self.climb(target);
        let found = climb.any(|id| id == manager);
        if !found && climb.cycle_detected() {
            debug!(%manager, %target, "management chain loops; treating as no match");
        }
        found
    }

    /// Indexed form of [`get_subordinate_ids`].
    #[must_use]
    pub fn subordinate_ids(&self, member: MemberId) -> Vec<UserId> {
        self.subordinates(member)
            .into_iter()
            .map(|m| m.user_id)
            .collect()
    }

    /// Rows transitively reporting to `member`, in the order described on
    /// [`get_subordinate_ids`].
    #[must_use]
    pub fn subordinates(&self, member: MemberId) -> Vec<&'a Member> {
        let members = self.members();
        let mut visited: HashSet<MemberId> = HashSet::from([member]);
        let mut stack: Vec<usize> = self.report_positions(member).iter().rev().copied().collect();
        let mut result: Vec<&'a Member> = Vec::new();

        while let Some(pos) = stack.pop() {
            let report = &members[pos];
            if !visited.insert(report.id) {
                debug!(%member, revisited = %report.id, "reporting line loops; branch not expanded");
                continue;
            }
            result.push(report);
            stack.extend(self.report_positions(report.id).iter().rev().copied());
        }

        result
    }

    /// Indexed form of [`ancestor_ids`].
    #[must_use]
    pub fn ancestor_ids(&self, member: MemberId) -> Vec<MemberId> {
        let mut seen: HashSet<MemberId> = HashSet::from([member]);
        self.climb(member)
            .take_while(|&id| self.contains(id) && seen.insert(id))
            .collect()
    }
}
