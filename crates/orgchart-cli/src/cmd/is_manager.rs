//! `orgchart is-manager`: is one member above another?

use std::io::Write;

use clap::Args;
use orgchart_core::model::MemberId;
use serde::Serialize;

use crate::cmd::Session;
use crate::output::render_mode;

/// Arguments for `orgchart is-manager`.
#[derive(Args, Debug)]
pub struct IsManagerArgs {
    /// Candidate manager's member id.
    #[arg(value_name = "MANAGER_ID")]
    pub manager: u64,

    /// Member whose management chain is walked.
    #[arg(value_name = "TARGET_ID")]
    pub target: u64,
}

#[derive(Debug, Serialize)]
struct IsManagerOutput {
    manager_id: MemberId,
    target_id: MemberId,
    is_manager: bool,
}

/// Execute `orgchart is-manager`.
///
/// Unknown ids are not an error: they simply have no chain.
pub fn run_is_manager(args: &IsManagerArgs, session: &Session) -> anyhow::Result<()> {
    let manager_id = MemberId(args.manager);
    let target_id = MemberId(args.target);
    let payload = IsManagerOutput {
        manager_id,
        target_id,
        is_manager: session.index().is_manager_of(manager_id, target_id),
    };
    render_mode(session.output, &payload, render_text, render_pretty)
}

fn render_text(payload: &IsManagerOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", payload.is_manager)
}

fn render_pretty(payload: &IsManagerOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let verb = if payload.is_manager {
        "manages"
    } else {
        "does not manage"
    };
    writeln!(w, "#{} {verb} #{}", payload.manager_id, payload.target_id)
}
