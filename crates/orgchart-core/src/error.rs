use std::fmt;

use crate::model::MemberId;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SnapshotUnreadable,
    MemberNotFound,
    DuplicateMember,
    CycleDetected,
    CorruptHierarchy,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SnapshotUnreadable => "E1002",
            Self::MemberNotFound => "E2001",
            Self::DuplicateMember => "E2002",
            Self::CycleDetected => "E2003",
            Self::CorruptHierarchy => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SnapshotUnreadable => "Member snapshot could not be read",
            Self::MemberNotFound => "Member not found",
            Self::DuplicateMember => "Duplicate member id",
            Self::CycleDetected => "Cycle would be created",
            Self::CorruptHierarchy => "Stored hierarchy already contains a cycle",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in orgchart.toml and retry."),
            Self::SnapshotUnreadable => {
                Some("Pass --members with a JSON array of member rows, or set [snapshot] path.")
            }
            Self::MemberNotFound => Some("Check the member id (the row id, not the user id)."),
            Self::DuplicateMember => Some("Member ids must be unique within one scope."),
            Self::CycleDetected => {
                Some("Pick a manager that is not the member itself or one of its reports.")
            }
            Self::CorruptHierarchy => {
                Some("Run `orgchart cycles` and clear one manager reference per cycle.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the validated [`Forest`](crate::hierarchy::Forest).
///
/// The read-path operations in [`crate::hierarchy`] never fail; these only
/// come from constructing or editing a forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("duplicate member id: {0}")]
    DuplicateMember(MemberId),

    /// `path` runs from `member` down its reporting line to
    /// `proposed_manager`; the edit would close it into a loop.
    #[error("assigning {proposed_manager} as manager of {member} would create a cycle ({})", join_path(.path))]
    CycleDetected {
        member: MemberId,
        proposed_manager: MemberId,
        path: Vec<MemberId>,
    },

    #[error("hierarchy contains {} manager cycle(s)", .cycles.len())]
    CorruptHierarchy { cycles: Vec<Vec<MemberId>> },
}

impl HierarchyError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MemberNotFound(_) => ErrorCode::MemberNotFound,
            Self::DuplicateMember(_) => ErrorCode::DuplicateMember,
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::CorruptHierarchy { .. } => ErrorCode::CorruptHierarchy,
        }
    }
}

fn join_path(path: &[MemberId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
