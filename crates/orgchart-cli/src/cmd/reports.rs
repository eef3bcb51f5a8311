//! `orgchart reports`: direct reports of a member.

use std::io::Write;

use clap::Args;
use orgchart_core::model::MemberId;
use serde::Serialize;

use crate::cmd::{MemberArg, MemberRow, Session, pretty_label, text_row};
use crate::output::{pretty_section, render_mode};

/// Arguments for `orgchart reports`.
#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(flatten)]
    pub target: MemberArg,
}

#[derive(Debug, Serialize)]
struct ReportsOutput {
    member_id: MemberId,
    reports: Vec<MemberRow>,
}

/// Execute `orgchart reports`.
pub fn run_reports(args: &ReportsArgs, session: &Session) -> anyhow::Result<()> {
    let id = MemberId(args.target.member);
    session.require(id)?;

    let index = session.index();
    let reports = index
        .report_positions(id)
        .iter()
        .map(|&pos| MemberRow::from(&session.members[pos]))
        .collect();

    let payload = ReportsOutput {
        member_id: id,
        reports,
    };
    render_mode(session.output, &payload, render_text, render_pretty)
}

fn render_text(payload: &ReportsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.reports {
        text_row(w, row)?;
    }
    Ok(())
}

fn render_pretty(payload: &ReportsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Direct reports of #{} ({})",
            payload.member_id,
            payload.reports.len()
        ),
    )?;
    if payload.reports.is_empty() {
        writeln!(w, "No direct reports.")?;
    }
    for row in &payload.reports {
        writeln!(w, "  {}", pretty_label(row))?;
    }
    Ok(())
}
