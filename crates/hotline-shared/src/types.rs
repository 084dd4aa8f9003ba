use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ONLINE_WINDOW_SECS;
use crate::timestamp;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RequestId(pub i64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CallId(pub i64);

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated user as the auth service returns it.
///
/// Read-only projection of server state; the client never mutates it, only
/// persists it verbatim and clears it on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, with = "timestamp::flexible_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A friend, as returned by the contacts service's `friends` query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, with = "timestamp::flexible_opt")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Contact {
    /// Presence is derived, never stored: online iff seen strictly less than
    /// five minutes before `now`. A contact never seen is offline.
    pub fn is_online_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_seen {
            Some(seen) => now - seen < Duration::seconds(ONLINE_WINDOW_SECS),
            None => false,
        }
    }
}

/// A pending incoming friend request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendRequest {
    pub id: RequestId,
    pub sender_id: UserId,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, with = "timestamp::flexible_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of a user search. Transient, per-query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// One row of the calls service's history query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub id: CallId,
    pub status: String,
    #[serde(default, with = "timestamp::flexible_opt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::flexible_opt")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    pub caller_id: UserId,
    pub receiver_id: UserId,
    pub other_user_name: String,
    #[serde(default)]
    pub other_user_avatar: Option<String>,
}

impl CallRecord {
    /// Whether this user placed the call (as opposed to receiving it).
    pub fn is_outgoing_for(&self, user: UserId) -> bool {
        self.caller_id == user
    }
}
