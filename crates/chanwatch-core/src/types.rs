//! User and channel records.
//!
//! Records are plain data. Absent fields are `Option::None`; no field is
//! validated beyond the id types.

use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, UserId};

/// Opaque, caller-managed session state attached to a user.
///
/// Stored verbatim as JSON; the store never inspects it.
pub type Session = serde_json::Value;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Platform user id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Serialized session state, if one has been set.
    pub session: Option<Session>,
}

impl User {
    /// Create a new user with no session.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            session: None,
        }
    }
}

/// A monitored channel.
///
/// `user_id` refers to the owning [`User`], but nothing enforces that the
/// user exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub base_username: String,
    /// Check interval, in caller-defined units.
    pub interval: i64,
    pub is_active: bool,
    /// When the caller last observed a change (Unix ms).
    pub last_changed: Option<i64>,
}

impl Channel {
    /// Create a new channel: active, never changed.
    pub fn new(
        user_id: UserId,
        channel_id: ChannelId,
        base_username: impl Into<String>,
        interval: i64,
    ) -> Self {
        Self {
            user_id,
            channel_id,
            base_username: base_username.into(),
            interval,
            is_active: true,
            last_changed: None,
        }
    }
}
