//! Subcommand handlers.
//!
//! Each handler takes its parsed args plus a [`Session`]: the loaded member
//! snapshot, the effective config, and the resolved output mode.

pub mod chain;
pub mod check_reparent;
pub mod cycles;
pub mod eligible;
pub mod is_manager;
pub mod reports;
pub mod stats;
pub mod subordinates;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use orgchart_core::config::EffectiveConfig;
use orgchart_core::error::{ErrorCode, HierarchyError};
use orgchart_core::hierarchy::MemberIndex;
use orgchart_core::model::{Member, MemberId, UserId};
use orgchart_core::snapshot;
use serde::Serialize;
use tracing::{debug, warn};

use crate::output::{CliError, OutputMode};

/// Everything a handler needs besides its own arguments.
#[derive(Debug)]
pub struct Session {
    pub members: Vec<Member>,
    pub config: EffectiveConfig,
    pub output: OutputMode,
}

impl Session {
    /// Load the snapshot named by `--members`, falling back to the config's
    /// `[snapshot] path`.
    pub fn load(
        members_flag: Option<&Path>,
        config: EffectiveConfig,
        output: OutputMode,
    ) -> anyhow::Result<Self> {
        let path: PathBuf = match members_flag {
            Some(path) => path.to_path_buf(),
            None => config.snapshot_path().ok_or_else(|| {
                CliError::coded("no member snapshot given", ErrorCode::SnapshotUnreadable)
            })?,
        };

        let members = snapshot::load_members(&path).map_err(|err| {
            CliError::coded(format!("{err:#}"), ErrorCode::SnapshotUnreadable)
        })?;
        debug!(path = %path.display(), members = members.len(), "session ready");

        Ok(Self {
            members,
            config,
            output,
        })
    }

    pub fn index(&self) -> MemberIndex<'_> {
        MemberIndex::new(&self.members)
    }

    /// Look up a row, failing with [`HierarchyError::MemberNotFound`].
    pub fn require(&self, id: MemberId) -> anyhow::Result<&Member> {
        self.index()
            .get(id)
            .ok_or_else(|| HierarchyError::MemberNotFound(id).into())
    }

    /// Log when a built tree is deeper than `[hierarchy] max_depth_warning`.
    pub fn warn_if_deep(&self, depth: usize) {
        let limit = self.config.project.hierarchy.max_depth_warning;
        if depth > limit {
            warn!(depth, limit, "hierarchy is deeper than max_depth_warning");
        }
    }
}

/// Positional member id shared by the single-member subcommands.
#[derive(Args, Debug)]
pub struct MemberArg {
    /// Member row id (not the user id).
    #[arg(value_name = "MEMBER_ID")]
    pub member: u64,
}

/// Compact serialized form of a member row in command output.
#[derive(Debug, Serialize)]
pub struct MemberRow {
    pub id: MemberId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<MemberId>,
    pub name: String,
    pub role: String,
    pub email: String,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            manager_id: m.manager_id,
            name: m.name.clone(),
            role: m.role.clone(),
            email: m.email.clone(),
        }
    }
}

/// Tab-separated `id user_id name role` row used by text output.
pub fn text_row(w: &mut dyn std::io::Write, row: &MemberRow) -> std::io::Result<()> {
    writeln!(w, "{}\t{}\t{}\t{}", row.id, row.user_id, row.name, row.role)
}

/// `#id name (role)` label used by pretty output.
pub fn pretty_label(row: &MemberRow) -> String {
    match (row.name.is_empty(), row.role.is_empty()) {
        (true, true) => format!("#{}", row.id),
        (true, false) => format!("#{} ({})", row.id, row.role),
        (false, true) => format!("#{} {}", row.id, row.name),
        (false, false) => format!("#{} {} ({})", row.id, row.name, row.role),
    }
}

/// Config loading wrapped with the code scripted callers expect.
pub fn resolve_config(working_dir: &Path, json: bool) -> anyhow::Result<EffectiveConfig> {
    orgchart_core::config::resolve_config(working_dir, json)
        .with_context(|| format!("loading config from {}", working_dir.display()))
        .map_err(|err| CliError::coded(format!("{err:#}"), ErrorCode::ConfigParseError).into())
}
