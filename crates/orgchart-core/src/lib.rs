#![forbid(unsafe_code)]
//! orgchart-core library.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for domain failures ([`error::HierarchyError`]);
//!   `anyhow::Result` for file and config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod snapshot;

pub use error::{ErrorCode, HierarchyError};
pub use hierarchy::{
    Forest, MemberIndex, ReparentCheck, TreeNode, build_hierarchy_tree, get_subordinate_ids,
    is_manager_of, would_create_cycle,
};
pub use model::{Member, MemberId, UserId};
