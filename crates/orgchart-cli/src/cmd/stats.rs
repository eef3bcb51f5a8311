//! `orgchart stats`: summary statistics and the structural fingerprint.

use std::io::Write;

use clap::Args;
use orgchart_core::hierarchy::HierarchyStats;
use orgchart_core::snapshot;
use serde::Serialize;

use crate::cmd::Session;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `orgchart stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

#[derive(Debug, Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    stats: HierarchyStats,
    fingerprint: String,
}

/// Execute `orgchart stats`.
pub fn run_stats(_args: &StatsArgs, session: &Session) -> anyhow::Result<()> {
    let stats = HierarchyStats::from_members(&session.members);
    session.warn_if_deep(stats.max_depth);

    let payload = StatsOutput {
        stats,
        fingerprint: snapshot::fingerprint(&session.members),
    };
    render_mode(session.output, &payload, render_text, render_pretty)
}

fn fields(payload: &StatsOutput) -> [(&'static str, String); 7] {
    let s = &payload.stats;
    [
        ("members", s.member_count.to_string()),
        ("roots", s.root_count.to_string()),
        ("dangling", s.dangling_count.to_string()),
        ("max_depth", s.max_depth.to_string()),
        ("max_span", s.max_span.to_string()),
        ("cyclic_members", s.cyclic_member_count.to_string()),
        ("fingerprint", payload.fingerprint.clone()),
    ]
}

fn render_text(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for (key, value) in fields(payload) {
        writeln!(w, "{key}\t{value}")?;
    }
    Ok(())
}

fn render_pretty(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Hierarchy stats")?;
    for (key, value) in fields(payload) {
        pretty_kv(w, key, value)?;
    }
    if payload.stats.cyclic_member_count > 0 {
        writeln!(w, "\nRun `orgchart cycles` to list the manager cycles.")?;
    }
    Ok(())
}
