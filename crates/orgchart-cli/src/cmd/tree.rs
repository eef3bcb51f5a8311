//! `orgchart tree`: render the management forest.

use std::io::Write;

use clap::Args;
use orgchart_core::hierarchy::TreeNode;
use serde::Serialize;
use tracing::info;

use crate::cmd::{MemberRow, Session, pretty_label};
use crate::output::{pretty_section, render_mode};

/// Arguments for `orgchart tree`.
#[derive(Args, Debug, Default)]
pub struct TreeArgs {
    /// Only render the subtree under this member.
    #[arg(long, value_name = "MEMBER_ID")]
    pub root: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TreeOutput {
    roots: Vec<TreeNode>,
    member_count: usize,
    /// Rows rendered in `roots`.
    placed: usize,
    /// Rows missing from the whole forest (on or under a manager cycle).
    unplaced: usize,
}

/// Execute `orgchart tree`.
pub fn run_tree(args: &TreeArgs, session: &Session) -> anyhow::Result<()> {
    let index = session.index();
    let forest = index.build_tree();
    let unplaced = session.members.len() - forest.iter().map(TreeNode::size).sum::<usize>();

    let roots = match args.root {
        None => forest,
        Some(raw) => {
            let id = session.require(raw.into())?.id;
            forest
                .into_iter()
                .find_map(|root| find_subtree(root, id))
                .map(|node| vec![node])
                .unwrap_or_default()
        }
    };

    let placed: usize = roots.iter().map(TreeNode::size).sum();
    let depth = roots.iter().map(TreeNode::depth).max().unwrap_or(0);
    session.warn_if_deep(depth);
    info!(roots = roots.len(), placed, depth, "built hierarchy tree");

    let payload = TreeOutput {
        roots,
        member_count: session.members.len(),
        placed,
        unplaced,
    };
    render_mode(session.output, &payload, render_tree_text, render_tree_pretty)
}

/// Detach the subtree rooted at `id`, if it is under `node`.
fn find_subtree(node: TreeNode, id: orgchart_core::model::MemberId) -> Option<TreeNode> {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if node.id() == id {
            return Some(node);
        }
        stack.extend(node.children);
    }
    None
}

fn render_tree_text(payload: &TreeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for root in &payload.roots {
        for (depth, node) in root.walk() {
            let row = MemberRow::from(&node.member);
            writeln!(
                w,
                "{:indent$}{}\t{}\t{}",
                "",
                row.id,
                row.user_id,
                row.name,
                indent = depth * 2
            )?;
        }
    }
    Ok(())
}

fn render_tree_pretty(payload: &TreeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Hierarchy ({} roots, {} members)",
            payload.roots.len(),
            payload.placed
        ),
    )?;
    if payload.roots.is_empty() {
        writeln!(w, "No members.")?;
        return Ok(());
    }

    for root in &payload.roots {
        writeln!(w, "{}", pretty_label(&MemberRow::from(&root.member)))?;
        write_children(root, "", w)?;
    }

    if payload.unplaced > 0 {
        writeln!(
            w,
            "\n{} member(s) not shown: on or under a manager cycle (see `orgchart cycles`)",
            payload.unplaced
        )?;
    }
    Ok(())
}

fn write_children(node: &TreeNode, prefix: &str, w: &mut dyn Write) -> std::io::Result<()> {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, carry) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        writeln!(
            w,
            "{prefix}{branch}{}",
            pretty_label(&MemberRow::from(&child.member))
        )?;
        write_children(child, &format!("{prefix}{carry}"), w)?;
    }
    Ok(())
}
