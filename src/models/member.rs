//! Member status model
//!
//! Telegram reports a member status per (chat, user). Only some statuses mean
//! the user is still part of the group.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use teloxide::types::{ChatMember, ChatMemberStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl MemberStatus {
    /// Statuses that count as belonging to the group
    pub const MEMBER_STATUSES: [MemberStatus; 4] = [
        MemberStatus::Creator,
        MemberStatus::Administrator,
        MemberStatus::Member,
        MemberStatus::Restricted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Creator => "creator",
            MemberStatus::Administrator => "administrator",
            MemberStatus::Member => "member",
            MemberStatus::Restricted => "restricted",
            MemberStatus::Left => "left",
            MemberStatus::Kicked => "kicked",
        }
    }

    pub fn is_member(&self) -> bool {
        Self::MEMBER_STATUSES.contains(self)
    }

    /// Member statuses as strings, for `= ANY($n)` queries
    pub fn member_status_names() -> Vec<String> {
        Self::MEMBER_STATUSES.iter().map(|s| s.as_str().to_string()).collect()
    }

    /// Whether a stored status string counts as membership
    pub fn is_member_str(status: &str) -> bool {
        status.parse::<MemberStatus>().map(|s| s.is_member()).unwrap_or(false)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(MemberStatus::Creator),
            "administrator" => Ok(MemberStatus::Administrator),
            "member" => Ok(MemberStatus::Member),
            "restricted" => Ok(MemberStatus::Restricted),
            "left" => Ok(MemberStatus::Left),
            "kicked" => Ok(MemberStatus::Kicked),
            other => Err(format!("unknown member status: {}", other)),
        }
    }
}

impl From<ChatMemberStatus> for MemberStatus {
    fn from(status: ChatMemberStatus) -> Self {
        match status {
            ChatMemberStatus::Owner => MemberStatus::Creator,
            ChatMemberStatus::Administrator => MemberStatus::Administrator,
            ChatMemberStatus::Member => MemberStatus::Member,
            ChatMemberStatus::Restricted => MemberStatus::Restricted,
            ChatMemberStatus::Left => MemberStatus::Left,
            ChatMemberStatus::Banned => MemberStatus::Kicked,
        }
    }
}

/// Live view of a user in a chat, as reported by the membership oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub telegram_id: i64,
    pub status: MemberStatus,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl MemberSnapshot {
    pub fn is_member(&self) -> bool {
        self.status.is_member()
    }
}

impl From<&ChatMember> for MemberSnapshot {
    fn from(member: &ChatMember) -> Self {
        Self {
            telegram_id: member.user.id.0 as i64,
            status: member.status().into(),
            first_name: member.user.first_name.clone(),
            last_name: member.user.last_name.clone(),
            username: member.user.username.clone(),
        }
    }
}
