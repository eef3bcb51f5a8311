//! `orgchart cycles`: manager cycles already present in the snapshot.

use std::io::Write;

use clap::Args;
use orgchart_core::hierarchy::find_manager_cycles;
use orgchart_core::model::MemberId;
use serde::Serialize;

use crate::cmd::{MemberRow, Session, pretty_label};
use crate::output::render_mode;

/// Arguments for `orgchart cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<MemberId>>,
    #[serde(skip)]
    rows: Vec<Vec<MemberRow>>,
}

/// Execute `orgchart cycles`.
pub fn run_cycles(_args: &CyclesArgs, session: &Session) -> anyhow::Result<()> {
    let cycles = find_manager_cycles(&session.members);
    let index = session.index();
    let rows: Vec<Vec<MemberRow>> = cycles
        .iter()
        .map(|cycle| {
            cycle
                .iter()
                .filter_map(|&id| index.get(id))
                .map(MemberRow::from)
                .collect()
        })
        .collect();

    render_mode(
        session.output,
        &CyclesOutput { cycles, rows },
        render_cycles_text,
        render_cycles_human,
    )
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for cycle in &payload.cycles {
        let ids: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        writeln!(w, "{}", ids.join(" "))?;
    }
    Ok(())
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No manager cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Manager cycles ({})", payload.cycles.len())?;

    for (idx, cycle) in payload.rows.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for row in cycle {
            writeln!(w, "  - {}", pretty_label(row))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::test_support::{m, rendered};

    #[test]
    fn cycles_args_parse_no_flags() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CyclesArgs,
        }

        let parsed = Wrapper::parse_from(["test"]);
        let _ = parsed.args;
    }

    #[test]
    fn render_cycles_human_no_cycles() {
        let payload = CyclesOutput {
            cycles: Vec::new(),
            rows: Vec::new(),
        };
        let out = rendered(|w| render_cycles_human(&payload, w));
        assert!(out.contains("No manager cycles found."));
    }

    #[test]
    fn render_cycles_human_lists_groups() {
        let payload = CyclesOutput {
            cycles: vec![vec![MemberId(1), MemberId(2)]],
            rows: vec![vec![
                MemberRow::from(&m(1, Some(2), "Ada")),
                MemberRow::from(&m(2, Some(1), "Bo")),
            ]],
        };
        let out = rendered(|w| render_cycles_human(&payload, w));
        assert!(out.contains("Manager cycles (1)"));
        assert!(out.contains("Cycle 1:"));
        assert!(out.contains("  - #1 Ada"));
        assert!(out.contains("  - #2 Bo"));
    }

    #[test]
    fn text_one_cycle_per_line() {
        let payload = CyclesOutput {
            cycles: vec![vec![MemberId(1), MemberId(2)], vec![MemberId(5)]],
            rows: Vec::new(),
        };
        assert_eq!(rendered(|w| render_cycles_text(&payload, w)), "1 2\n5\n");
    }
}
