//! Membership rows as supplied by the storage collaborator.
//!
//! A [`Member`] is one person's membership in a scope (typically a
//! department). The row's own [`MemberId`] is what `manager_id` points at;
//! the [`UserId`] identifies the underlying person and is what reporting-line
//! queries hand back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a membership row, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

/// Identifier of the person behind a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One membership row.
///
/// `role`, `name` and `email` are descriptive only; the engine never reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    /// `None` marks a root. A value that matches no row in the collection is
    /// also treated as a root.
    #[serde(default)]
    pub manager_id: Option<MemberId>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Member {
    /// Build a bare row with empty descriptive fields.
    pub fn new(id: impl Into<MemberId>, user_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            manager_id: None,
            role: String::new(),
            name: String::new(),
            email: String::new(),
        }
    }

    /// Set the manager reference.
    #[must_use]
    pub fn reporting_to(mut self, manager_id: impl Into<MemberId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    /// Set the descriptive fields.
    #[must_use]
    pub fn with_profile(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.name = name.into();
        self.email = email.into();
        self.role = role.into();
        self
    }

    /// `true` when the row carries no manager reference at all.
    #[must_use]
    pub const fn is_unmanaged(&self) -> bool {
        self.manager_id.is_none()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "#{}", self.id)
        } else {
            write!(f, "#{} {}", self.id, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_json_uses_snake_case_and_defaults() {
        let m: Member =
            serde_json::from_str(r#"{"id": 7, "user_id": 70}"#).expect("parse minimal member");
        assert_eq!(m.id, MemberId(7));
        assert_eq!(m.user_id, UserId(70));
        assert!(m.manager_id.is_none());
        assert!(m.name.is_empty());
    }

    #[test]
    fn member_json_null_manager_is_root() {
        let m: Member = serde_json::from_str(
            r#"{"id": 2, "user_id": 20, "manager_id": null, "role": "lead"}"#,
        )
        .expect("parse member");
        assert!(m.is_unmanaged());
        assert_eq!(m.role, "lead");
    }

    #[test]
    fn ids_serialize_transparently() {
        let m = Member::new(3, 30).reporting_to(1);
        let v = serde_json::to_value(&m).expect("serialize");
        assert_eq!(v["id"], 3);
        assert_eq!(v["user_id"], 30);
        assert_eq!(v["manager_id"], 1);
    }

    #[test]
    fn display_prefers_name() {
        let anon = Member::new(4, 40);
        assert_eq!(anon.to_string(), "#4");
        let named = Member::new(4, 40).with_profile("Ada", "ada@example.com", "manager");
        assert_eq!(named.to_string(), "#4 Ada");
    }
}
