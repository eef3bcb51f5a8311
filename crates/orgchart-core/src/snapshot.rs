//! Member snapshots handed over by the storage collaborator.
//!
//! A snapshot file is JSON: either a bare array of member rows or an object
//! with a `members` array (the shape most table exports take).
//!
//! ## Fingerprints
//!
//! [`fingerprint`] is a BLAKE3 hash of the sorted `(id, manager_id)` pairs.
//! Only structure contributes: renaming someone leaves it unchanged, moving
//! someone does not. A caller that validated a reparent against one snapshot
//! can re-read the table right before writing and refuse the write if the
//! fingerprint moved in between.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::model::Member;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Rows(Vec<Member>),
    Wrapped { members: Vec<Member> },
}

/// Parse a snapshot from JSON text.
///
/// # Errors
///
/// Returns an error if `json` is neither a member array nor an object with a
/// `members` array.
pub fn parse_members(json: &str) -> Result<Vec<Member>> {
    let file: SnapshotFile =
        serde_json::from_str(json).context("snapshot is not a member array or {\"members\": [...]}")?;
    Ok(match file {
        SnapshotFile::Rows(members) | SnapshotFile::Wrapped { members } => members,
    })
}

/// Read and parse the snapshot at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_members(path: &Path) -> Result<Vec<Member>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let members =
        parse_members(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), members = members.len(), "loaded member snapshot");
    Ok(members)
}

/// Structural fingerprint of `members`, formatted `blake3:<hex>`.
#[must_use]
pub fn fingerprint(members: &[Member]) -> String {
    let mut edges: Vec<(u64, Option<u64>)> = members
        .iter()
        .map(|m| (m.id.0, m.manager_id.map(|id| id.0)))
        .collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for (id, manager) in edges {
        hasher.update(&id.to_le_bytes());
        match manager {
            Some(manager) => {
                hasher.update(b"\x01");
                hasher.update(&manager.to_le_bytes());
            }
            None => {
                hasher.update(b"\x00");
            }
        }
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;

    #[test]
    fn parses_bare_array() {
        let members = parse_members(
            r#"[{"id": 1, "user_id": 10}, {"id": 2, "user_id": 20, "manager_id": 1}]"#,
        )
        .expect("parse");
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].manager_id, Some(MemberId(1)));
    }

    #[test]
    fn parses_wrapped_object() {
        let members =
            parse_members(r#"{"members": [{"id": 1, "user_id": 10, "name": "Ada"}]}"#)
                .expect("parse");
        assert_eq!(members[0].name, "Ada");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_members(r#"{"rows": 3}"#).is_err());
        assert!(parse_members("not json").is_err());
    }

    #[test]
    fn load_reports_path_on_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let err = load_members(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("members.json");
        std::fs::write(&path, r#"[{"id": 1, "user_id": 10}]"#).expect("write");
        assert_eq!(load_members(&path).expect("load").len(), 1);
    }

    #[test]
    fn fingerprint_ignores_order_and_profile() {
        let a = vec![
            Member::new(1, 10),
            Member::new(2, 20).reporting_to(1),
        ];
        let b = vec![
            Member::new(2, 20).reporting_to(1).with_profile("Bo", "bo@example.com", "lead"),
            Member::new(1, 10),
        ];
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert!(fingerprint(&a).starts_with("blake3:"));
    }

    #[test]
    fn fingerprint_tracks_manager_changes() {
        let a = vec![Member::new(1, 10), Member::new(2, 20)];
        let b = vec![Member::new(1, 10), Member::new(2, 20).reporting_to(1)];
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}
