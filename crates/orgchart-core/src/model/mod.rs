//! Data model shared by the hierarchy engine and its callers.

pub mod member;

pub use member::{Member, MemberId, UserId};
