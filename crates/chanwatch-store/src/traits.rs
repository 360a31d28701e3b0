//! Store trait: the abstract interface for user and channel persistence.
//!
//! Implementations include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use chanwatch_core::{Channel, ChannelId, Session, User, UserId};

use crate::error::Result;

/// The Store trait: async interface over the `users` and `channels` collections.
///
/// All methods are async so the SQLite backend can run its synchronous calls
/// on a blocking worker thread without stalling the runtime.
///
/// # Design Notes
///
/// - Ids arrive already coerced to integers.
/// - Lookups return the first match in insertion order.
/// - Updates and deletes apply to every match; zero matches is a no-op.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // User Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a user record as given.
    async fn add_user(&self, user: User) -> Result<()>;

    /// Check whether any user with this id exists.
    async fn is_user_exist(&self, id: UserId) -> Result<bool>;

    /// Count all user records.
    async fn total_users_count(&self) -> Result<u64>;

    /// Get every user record, in insertion order.
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Remove every user record with this id.
    async fn delete_user(&self, id: UserId) -> Result<()>;

    /// Replace the session of every user record with this id.
    async fn set_session(&self, id: UserId, session: Option<Session>) -> Result<()>;

    /// Get the session of the first user with this id.
    ///
    /// `None` if the user is missing or has no session.
    async fn get_session(&self, id: UserId) -> Result<Option<Session>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Channel Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a channel record as given.
    async fn add_channel(&self, channel: Channel) -> Result<()>;

    /// Get the active channels owned by a user.
    async fn get_user_channels(&self, user_id: UserId) -> Result<Vec<Channel>>;

    /// Get every active channel.
    async fn get_all_active_channels(&self) -> Result<Vec<Channel>>;

    /// Set `is_active` on every channel record with this id.
    async fn set_channel_active(&self, channel_id: ChannelId, active: bool) -> Result<()>;

    /// Remove every channel record with this id.
    async fn delete_channel(&self, channel_id: ChannelId) -> Result<()>;

    /// Set `last_changed` on every channel record with this id.
    async fn update_last_changed(&self, channel_id: ChannelId, timestamp: i64) -> Result<()>;

    /// Get the first channel record with this id.
    async fn get_channel(&self, channel_id: ChannelId) -> Result<Option<Channel>>;
}
