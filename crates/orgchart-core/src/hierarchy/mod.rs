//! Organizational-hierarchy engine.
//!
//! # Overview
//!
//! Members form a management relation through `manager_id`. This module
//! reconstructs the implied forest, answers reachability questions over it,
//! and validates proposed reparent edits before they are committed.
//!
//! ## Pipeline
//!
//! ```text
//! storage rows (&[Member])
//!        ↓  MemberIndex::new()          id → row, manager → reports
//!   ├─ build_hierarchy_tree()           Vec<TreeNode> (roots)
//!   ├─ get_subordinate_ids()            transitive reports
//!   ├─ is_manager_of()                  upward reachability
//!   └─ would_create_cycle()             pre-commit reparent check
//! ```
//!
//! Every operation takes the full snapshot explicitly, returns plain data,
//! and never mutates its input; concurrent calls on shared snapshots need no
//! locking. None of them panic or fail on dangling references, duplicate
//! ids, or cyclic data.
//!
//! [`Forest`] wraps a snapshot that has been validated acyclic and only
//! accepts edits that keep it so.
//!
//! ## Typical Usage
//!
//! ```rust
//! use orgchart_core::hierarchy::{build_hierarchy_tree, is_manager_of, would_create_cycle};
//! use orgchart_core::model::{Member, MemberId};
//!
//! let members = vec![
//!     Member::new(1, 100),
//!     Member::new(2, 200).reporting_to(1),
//!     Member::new(3, 300).reporting_to(2),
//! ];
//!
//! assert_eq!(build_hierarchy_tree(&members).len(), 1);
//! assert!(is_manager_of(&members, MemberId(1), MemberId(3)));
//! assert!(would_create_cycle(&members, MemberId(1), MemberId(3)));
//! assert!(!would_create_cycle(&members, MemberId(3), MemberId(1)));
//! ```

pub mod cycles;
pub mod forest;
pub mod index;
pub mod reach;
pub mod stats;
pub mod tree;

pub use cycles::{
    ReparentCheck, check_reparent, eligible_managers, find_manager_cycles, would_create_cycle,
};
pub use forest::Forest;
pub use index::{Climb, MemberIndex};
pub use reach::{ancestor_ids, direct_reports, get_subordinate_ids, is_manager_of, manager_of};
pub use stats::HierarchyStats;
pub use tree::{TreeNode, build_hierarchy_tree};
