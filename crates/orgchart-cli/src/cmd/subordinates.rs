//! `orgchart subordinates`: everyone transitively reporting to a member.

use std::io::Write;

use clap::Args;
use orgchart_core::model::{MemberId, UserId};
use serde::Serialize;

use crate::cmd::{MemberArg, MemberRow, Session, pretty_label};
use crate::output::{pretty_section, render_mode};

/// Arguments for `orgchart subordinates`.
#[derive(Args, Debug)]
pub struct SubordinatesArgs {
    #[command(flatten)]
    pub target: MemberArg,
}

#[derive(Debug, Serialize)]
struct SubordinatesOutput {
    member_id: MemberId,
    user_ids: Vec<UserId>,
    #[serde(skip)]
    manager: Option<MemberRow>,
    #[serde(skip)]
    rows: Vec<MemberRow>,
}

/// Execute `orgchart subordinates`.
pub fn run_subordinates(args: &SubordinatesArgs, session: &Session) -> anyhow::Result<()> {
    let id = MemberId(args.target.member);
    let manager = session.require(id)?;
    let index = session.index();
    let rows: Vec<MemberRow> = index
        .subordinates(id)
        .into_iter()
        .map(MemberRow::from)
        .collect();

    let payload = SubordinatesOutput {
        member_id: id,
        user_ids: rows.iter().map(|r| r.user_id).collect(),
        manager: Some(MemberRow::from(manager)),
        rows,
    };
    render_mode(session.output, &payload, render_text, render_pretty)
}

fn render_text(payload: &SubordinatesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for user_id in &payload.user_ids {
        writeln!(w, "{user_id}")?;
    }
    Ok(())
}

fn render_pretty(payload: &SubordinatesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let who = payload
        .manager
        .as_ref()
        .map_or_else(|| format!("#{}", payload.member_id), pretty_label);
    pretty_section(w, &format!("Subordinates of {who} ({})", payload.rows.len()))?;
    if payload.rows.is_empty() {
        writeln!(w, "No one reports to this member.")?;
    }
    for row in &payload.rows {
        writeln!(w, "  {:<8} {}", row.user_id, pretty_label(row))?;
    }
    Ok(())
}
