//! `orgchart eligible`: members that could safely become someone's manager.

use std::io::Write;

use clap::Args;
use orgchart_core::model::MemberId;
use serde::Serialize;

use crate::cmd::{MemberArg, MemberRow, Session, pretty_label, text_row};
use crate::output::{pretty_section, render_mode};

/// Arguments for `orgchart eligible`.
#[derive(Args, Debug)]
pub struct EligibleArgs {
    #[command(flatten)]
    pub target: MemberArg,
}

#[derive(Debug, Serialize)]
struct EligibleOutput {
    member_id: MemberId,
    candidates: Vec<MemberRow>,
}

/// Execute `orgchart eligible`.
pub fn run_eligible(args: &EligibleArgs, session: &Session) -> anyhow::Result<()> {
    let id = MemberId(args.target.member);
    session.require(id)?;

    let candidates = session
        .index()
        .eligible_managers(id)
        .into_iter()
        .map(MemberRow::from)
        .collect();

    render_mode(
        session.output,
        &EligibleOutput {
            member_id: id,
            candidates,
        },
        render_text,
        render_pretty,
    )
}

fn render_text(payload: &EligibleOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.candidates {
        text_row(w, row)?;
    }
    Ok(())
}

fn render_pretty(payload: &EligibleOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Eligible managers for #{} ({})",
            payload.member_id,
            payload.candidates.len()
        ),
    )?;
    if payload.candidates.is_empty() {
        writeln!(w, "Everyone else reports to this member.")?;
    }
    for row in &payload.candidates {
        writeln!(w, "  {}", pretty_label(row))?;
    }
    Ok(())
}
