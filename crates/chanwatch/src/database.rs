//! The Database: the async accessor surface for users and channels.
//!
//! Every operation coerces its ids to integers, then hands off to the
//! [`Store`]. The SQLite store runs the actual call on a blocking worker,
//! so awaiting here never stalls the runtime.

use std::sync::Arc;

use chanwatch_core::{Channel, ChannelId, IntoId, Session, User, UserId};
use chanwatch_store::{SqliteStore, Store};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Handle to the `users` and `channels` collections.
///
/// Open once at startup and pass clones to whatever needs it; clones share
/// the same backing store.
///
/// `S` may be unsized, so `Database<dyn Store>` works when the backend is
/// picked at runtime.
pub struct Database<S: Store + ?Sized> {
    store: Arc<S>,
}

impl<S: Store + ?Sized> Clone for Database<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl Database<SqliteStore> {
    /// Open (or create) the database file named by `config`.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.path)?;
        Ok(Self::new(store))
    }

    /// Open a throwaway in-memory SQLite database.
    pub fn open_memory() -> Result<Self> {
        Ok(Self::new(SqliteStore::open_memory()?))
    }
}

impl<S: Store> Database<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }
}

impl<S: Store + ?Sized> Database<S> {
    /// Wrap a store that is already shared.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a new user with no session.
    ///
    /// Does not check for an existing user with the same id.
    pub async fn add_user(&self, id: impl IntoId<UserId>, name: impl Into<String>) -> Result<()> {
        let id = id.into_id()?;
        tracing::trace!(%id, "add_user");
        self.store.add_user(User::new(id, name)).await?;
        Ok(())
    }

    /// Check whether a user with this id exists.
    pub async fn is_user_exist(&self, id: impl IntoId<UserId>) -> Result<bool> {
        let id = id.into_id()?;
        tracing::trace!(%id, "is_user_exist");
        Ok(self.store.is_user_exist(id).await?)
    }

    /// Count all stored users.
    pub async fn total_users_count(&self) -> Result<u64> {
        Ok(self.store.total_users_count().await?)
    }

    /// Get every user, in insertion order.
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(self.store.get_all_users().await?)
    }

    /// Remove every user with this id.
    pub async fn delete_user(&self, id: impl IntoId<UserId>) -> Result<()> {
        let id = id.into_id()?;
        tracing::trace!(%id, "delete_user");
        self.store.delete_user(id).await?;
        Ok(())
    }

    /// Attach session state to a user. A JSON `null` clears it.
    ///
    /// No-op if the user does not exist.
    pub async fn set_session(&self, id: impl IntoId<UserId>, session: Session) -> Result<()> {
        let id = id.into_id()?;
        tracing::trace!(%id, "set_session");
        let session = (!session.is_null()).then_some(session);
        self.store.set_session(id, session).await?;
        Ok(())
    }

    /// Get a user's session, or `None` if the user is missing or has none.
    pub async fn get_session(&self, id: impl IntoId<UserId>) -> Result<Option<Session>> {
        let id = id.into_id()?;
        tracing::trace!(%id, "get_session");
        Ok(self.store.get_session(id).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Channels
    // ─────────────────────────────────────────────────────────────────────────

    /// Start monitoring a channel. New channels are active.
    pub async fn add_channel(
        &self,
        user_id: impl IntoId<UserId>,
        channel_id: impl IntoId<ChannelId>,
        base_username: impl Into<String>,
        interval: i64,
    ) -> Result<()> {
        let user_id = user_id.into_id()?;
        let channel_id = channel_id.into_id()?;
        tracing::trace!(%user_id, %channel_id, "add_channel");
        let channel = Channel::new(user_id, channel_id, base_username, interval);
        self.store.add_channel(channel).await?;
        Ok(())
    }

    /// Active channels owned by `user_id`.
    pub async fn get_user_channels(&self, user_id: impl IntoId<UserId>) -> Result<Vec<Channel>> {
        let user_id = user_id.into_id()?;
        tracing::trace!(%user_id, "get_user_channels");
        Ok(self.store.get_user_channels(user_id).await?)
    }

    /// Get every active channel, regardless of owner.
    pub async fn get_all_active_channels(&self) -> Result<Vec<Channel>> {
        Ok(self.store.get_all_active_channels().await?)
    }

    /// Mark a channel inactive. It stays stored.
    pub async fn stop_channel(&self, channel_id: impl IntoId<ChannelId>) -> Result<()> {
        let channel_id = channel_id.into_id()?;
        tracing::trace!(%channel_id, "stop_channel");
        self.store.set_channel_active(channel_id, false).await?;
        Ok(())
    }

    /// Mark a stopped channel active again.
    pub async fn resume_channel(&self, channel_id: impl IntoId<ChannelId>) -> Result<()> {
        let channel_id = channel_id.into_id()?;
        tracing::trace!(%channel_id, "resume_channel");
        self.store.set_channel_active(channel_id, true).await?;
        Ok(())
    }

    /// Remove every channel with this id.
    pub async fn delete_channel(&self, channel_id: impl IntoId<ChannelId>) -> Result<()> {
        let channel_id = channel_id.into_id()?;
        tracing::trace!(%channel_id, "delete_channel");
        self.store.delete_channel(channel_id).await?;
        Ok(())
    }

    /// Record when a change was last seen on the channel (Unix ms).
    pub async fn update_last_changed(
        &self,
        channel_id: impl IntoId<ChannelId>,
        timestamp: i64,
    ) -> Result<()> {
        let channel_id = channel_id.into_id()?;
        tracing::trace!(%channel_id, timestamp, "update_last_changed");
        self.store.update_last_changed(channel_id, timestamp).await?;
        Ok(())
    }

    /// Get the first channel with this id, or `None`.
    pub async fn get_channel(&self, channel_id: impl IntoId<ChannelId>) -> Result<Option<Channel>> {
        let channel_id = channel_id.into_id()?;
        tracing::trace!(%channel_id, "get_channel");
        Ok(self.store.get_channel(channel_id).await?)
    }
}
