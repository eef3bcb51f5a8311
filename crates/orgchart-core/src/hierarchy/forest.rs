//! A member collection that is guaranteed to form a forest.
//!
//! The free functions in [`crate::hierarchy`] accept any snapshot and stay
//! total on bad data. [`Forest`] is the write-side counterpart: it can only
//! be built from, and edited into, states with unique ids and no manager
//! cycles, so the reparent check cannot be skipped by a careless caller.
//!
//! Dangling manager references are tolerated, exactly as on the read path:
//! such rows are roots.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::error::HierarchyError;
use crate::hierarchy::cycles::find_manager_cycles;
use crate::hierarchy::index::MemberIndex;
use crate::hierarchy::stats::HierarchyStats;
use crate::hierarchy::tree::TreeNode;
use crate::model::{Member, MemberId, UserId};
use crate::snapshot;

/// Validated, acyclic member collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest {
    members: Vec<Member>,
}

impl Forest {
    /// Validate `members` and wrap them.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::DuplicateMember`] for the first repeated id, or
    /// [`HierarchyError::CorruptHierarchy`] listing every manager cycle.
    #[instrument(level = "debug", skip(members), fields(members = members.len()))]
    pub fn new(members: Vec<Member>) -> Result<Self, HierarchyError> {
        let mut seen: HashSet<MemberId> = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.id) {
                return Err(HierarchyError::DuplicateMember(member.id));
            }
        }

        let cycles = find_manager_cycles(&members);
        if !cycles.is_empty() {
            warn!(cycles = cycles.len(), "refusing to build forest from cyclic snapshot");
            return Err(HierarchyError::CorruptHierarchy { cycles });
        }

        Ok(Self { members })
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn into_members(self) -> Vec<Member> {
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

    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn index(&self) -> MemberIndex<'_> {
        MemberIndex::new(&self.members)
    }

    /// Add a row.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::DuplicateMember`] if the id is taken, or
    /// [`HierarchyError::CycleDetected`] if the new row's manager chain
    /// would reach the row itself (possible when existing rows dangle on the
    /// new id).
    pub fn insert(&mut self, member: Member) -> Result<(), HierarchyError> {
        if self.get(member.id).is_some() {
            return Err(HierarchyError::DuplicateMember(member.id));
        }

        let id = member.id;
        let manager = member.manager_id;
        self.members.push(member);

        if let Some(manager) = manager {
            let check = self.index().check_reparent(id, manager);
            if let Some(err) = check.into_error(id, manager) {
                self.members.pop();
                return Err(err);
            }
        }

        Ok(())
    }

    /// Point `member` at `new_manager`, or clear its manager with `None`.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::MemberNotFound`] for an unknown member, or
    /// [`HierarchyError::CycleDetected`] when the edit would close a loop.
    /// On error the forest is unchanged.
    pub fn reparent(
        &mut self,
        member: MemberId,
        new_manager: Option<MemberId>,
    ) -> Result<(), HierarchyError> {
        let pos = self
            .members
            .iter()
            .position(|m| m.id == member)
            .ok_or(HierarchyError::MemberNotFound(member))?;

        if let Some(manager) = new_manager {
            let check = self.index().check_reparent(member, manager);
            if let Some(err) = check.into_error(member, manager) {
                return Err(err);
            }
        }

        debug!(%member, manager = ?new_manager, "reparented");
        self.members[pos].manager_id = new_manager;
        Ok(())
    }

    /// Remove a row and return it. Its reports keep the now-dangling
    /// reference and become roots.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::MemberNotFound`] for an unknown member.
    pub fn remove(&mut self, member: MemberId) -> Result<Member, HierarchyError> {
        let pos = self
            .members
            .iter()
            .position(|m| m.id == member)
            .ok_or(HierarchyError::MemberNotFound(member))?;
        Ok(self.members.remove(pos))
    }

    #[must_use]
    pub fn tree(&self) -> Vec<TreeNode> {
        self.index().build_tree()
    }

    #[must_use]
    pub fn subordinate_ids(&self, member: MemberId) -> Vec<UserId> {
        self.index().subordinate_ids(member)
    }

    #[must_use]
    pub fn is_manager_of(&self, manager: MemberId, target: MemberId) -> bool {
        self.index().is_manager_of(manager, target)
    }

    #[must_use]
    pub fn would_create_cycle(&self, member: MemberId, new_manager: MemberId) -> bool {
        self.index().would_create_cycle(member, new_manager)
    }

    #[must_use]
    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats::from_members(&self.members)
    }

    /// Structural fingerprint; see [`snapshot::fingerprint`].
    #[must_use]
    pub fn fingerprint(&self) -> String {
        snapshot::fingerprint(&self.members)
    }
}

impl TryFrom<Vec<Member>> for Forest {
    type Error = HierarchyError;

    fn try_from(members: Vec<Member>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}
