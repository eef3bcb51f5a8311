//! `orgchart check-reparent`: validate a manager change before it is written.
//!
//! Prints the verdict and exits non-zero when the edit is rejected, so the
//! command can gate a write in a shell pipeline.

use std::io::Write;

use clap::Args;
use orgchart_core::hierarchy::ReparentCheck;
use orgchart_core::model::MemberId;
use serde::Serialize;
use tracing::info;

use crate::cmd::Session;
use crate::output::render_mode;

/// Arguments for `orgchart check-reparent`.
#[derive(Args, Debug)]
pub struct CheckReparentArgs {
    /// Member whose manager would change.
    #[arg(value_name = "MEMBER_ID")]
    pub member: u64,

    /// Proposed new manager.
    #[arg(value_name = "NEW_MANAGER_ID")]
    pub new_manager: u64,
}

#[derive(Debug, Serialize)]
struct CheckReparentOutput {
    member_id: MemberId,
    new_manager_id: MemberId,
    #[serde(flatten)]
    check: ReparentCheck,
}

/// Execute `orgchart check-reparent`.
pub fn run_check_reparent(args: &CheckReparentArgs, session: &Session) -> anyhow::Result<()> {
    let member = MemberId(args.member);
    let new_manager = MemberId(args.new_manager);
    session.require(member)?;
    session.require(new_manager)?;

    let check = session.index().check_reparent(member, new_manager);
    info!(%member, %new_manager, safe = check.is_safe(), "checked reparent");

    let payload = CheckReparentOutput {
        member_id: member,
        new_manager_id: new_manager,
        check,
    };
    render_mode(session.output, &payload, render_text, render_pretty)?;

    match payload.check.into_error(member, new_manager) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn render_text(payload: &CheckReparentOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &payload.check {
        ReparentCheck::Safe => writeln!(w, "safe"),
        ReparentCheck::SelfLoop => writeln!(w, "self_loop"),
        ReparentCheck::Cycle { path } => writeln!(w, "cycle\t{}", join(path, " ")),
    }
}

fn render_pretty(payload: &CheckReparentOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let edit = format!(
        "#{} -> manager #{}",
        payload.member_id, payload.new_manager_id
    );
    match &payload.check {
        ReparentCheck::Safe => writeln!(w, "✓ {edit}: safe"),
        ReparentCheck::SelfLoop => writeln!(w, "✗ {edit}: a member cannot manage itself"),
        ReparentCheck::Cycle { path } => {
            writeln!(w, "✗ {edit}: would close a cycle")?;
            writeln!(w, "  reporting line: {}", join(path, " -> "))
        }
    }
}

fn join(path: &[MemberId], sep: &str) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::test_support::{m, rendered, session};
    use orgchart_core::error::HierarchyError;

    fn payload(check: ReparentCheck) -> CheckReparentOutput {
        CheckReparentOutput {
            member_id: MemberId(1),
            new_manager_id: MemberId(3),
            check,
        }
    }

    #[test]
    fn json_flattens_verdict() {
        let value = serde_json::to_value(payload(ReparentCheck::Cycle {
            path: vec![MemberId(1), MemberId(2), MemberId(3)],
        }))
        .expect("json");
        assert_eq!(value["verdict"], "cycle");
        assert_eq!(value["member_id"], 1);
        assert_eq!(value["path"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn text_verdicts() {
        assert_eq!(
            rendered(|w| render_text(&payload(ReparentCheck::Safe), w)),
            "safe\n"
        );
        assert_eq!(
            rendered(|w| render_text(
                &payload(ReparentCheck::Cycle {
                    path: vec![MemberId(1), MemberId(2), MemberId(3)]
                }),
                w
            )),
            "cycle\t1 2 3\n"
        );
    }

    #[test]
    fn pretty_explains_cycle() {
        let out = rendered(|w| {
            render_pretty(
                &payload(ReparentCheck::Cycle {
                    path: vec![MemberId(1), MemberId(2), MemberId(3)],
                }),
                w,
            )
        });
        assert!(out.contains("would close a cycle"));
        assert!(out.contains("1 -> 2 -> 3"));
    }

    #[test]
    fn rejected_edit_fails_with_cycle_error() {
        let s = session(vec![m(1, None, "Ada"), m(2, Some(1), "Bo"), m(3, Some(2), "Cy")]);

        let ok = CheckReparentArgs {
            member: 3,
            new_manager: 1,
        };
        assert!(run_check_reparent(&ok, &s).is_ok());

        let bad = CheckReparentArgs {
            member: 1,
            new_manager: 3,
        };
        let err = run_check_reparent(&bad, &s).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HierarchyError>(),
            Some(HierarchyError::CycleDetected { .. })
        ));
    }

    #[test]
    fn unknown_manager_is_not_found() {
        let s = session(vec![m(1, None, "Ada")]);
        let args = CheckReparentArgs {
            member: 1,
            new_manager: 9,
        };
        let err = run_check_reparent(&args, &s).unwrap_err();
        assert_eq!(
            err.downcast_ref::<HierarchyError>(),
            Some(&HierarchyError::MemberNotFound(MemberId(9)))
        );
    }
}
