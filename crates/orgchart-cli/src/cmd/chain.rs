//! `orgchart chain`: a member's management chain up to its root.

use std::io::Write;

use clap::Args;
use orgchart_core::model::MemberId;
use serde::Serialize;

use crate::cmd::{MemberArg, MemberRow, Session, pretty_label, text_row};
use crate::output::{pretty_section, render_mode};

/// Arguments for `orgchart chain`.
#[derive(Args, Debug)]
pub struct ChainArgs {
    #[command(flatten)]
    pub target: MemberArg,
}

#[derive(Debug, Serialize)]
struct ChainOutput {
    member: MemberRow,
    /// Immediate manager first.
    chain: Vec<MemberRow>,
}

/// Execute `orgchart chain`.
pub fn run_chain(args: &ChainArgs, session: &Session) -> anyhow::Result<()> {
    let id = MemberId(args.target.member);
    let member = MemberRow::from(session.require(id)?);

    let index = session.index();
    let chain = index
        .ancestor_ids(id)
        .into_iter()
        .filter_map(|ancestor| index.get(ancestor))
        .map(MemberRow::from)
        .collect();

    render_mode(
        session.output,
        &ChainOutput { member, chain },
        render_text,
        render_pretty,
    )
}

fn render_text(payload: &ChainOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.chain {
        text_row(w, row)?;
    }
    Ok(())
}

fn render_pretty(payload: &ChainOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Management chain of {}", pretty_label(&payload.member)),
    )?;
    if payload.chain.is_empty() {
        writeln!(w, "Top of the hierarchy: no manager.")?;
        return Ok(());
    }
    for (level, row) in payload.chain.iter().enumerate() {
        writeln!(w, "  {:>2}. {}", level + 1, pretty_label(row))?;
    }
    Ok(())
}
