use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// A registered person tracked by the journal.
///
/// Serialized with the exact field names of the persisted member list
/// (`id`, `nickname`, `color`, `createdAt`). `created_at` is kept verbatim as
/// stored; it is informational and never parsed on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub nickname: String,
    pub color: String,
    pub created_at: String,
}

/// One row of the member list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub id: i64,
    pub nickname: String,
    pub color: String,
    pub joined_on: String,
}

// Date part of an RFC 3339 timestamp, or the raw text if it is not one.
fn joined_on(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            nickname: member.nickname.clone(),
            color: member.color.clone(),
            joined_on: joined_on(&member.created_at),
        }
    }
}

/// An entry of the member selector on the workout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberOption {
    pub id: i64,
    pub nickname: String,
}

impl From<&Member> for MemberOption {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            nickname: member.nickname.clone(),
        }
    }
}
