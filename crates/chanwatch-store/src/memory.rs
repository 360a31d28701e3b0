//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use chanwatch_core::{Channel, ChannelId, Session, User, UserId};

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
/// Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    users: Vec<User>,
    channels: Vec<Channel>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn update_channels(&self, channel_id: ChannelId, f: impl Fn(&mut Channel)) -> Result<()> {
        let mut inner = self.write()?;
        inner
            .channels
            .iter_mut()
            .filter(|c| c.channel_id == channel_id)
            .for_each(f);
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn add_user(&self, user: User) -> Result<()> {
        self.write()?.users.push(user);
        Ok(())
    }

    async fn is_user_exist(&self, id: UserId) -> Result<bool> {
        Ok(self.read()?.users.iter().any(|u| u.id == id))
    }

    async fn total_users_count(&self) -> Result<u64> {
        Ok(self.read()?.users.len() as u64)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.write()?.users.retain(|u| u.id != id);
        Ok(())
    }

    async fn set_session(&self, id: UserId, session: Option<Session>) -> Result<()> {
        let mut inner = self.write()?;
        for user in inner.users.iter_mut().filter(|u| u.id == id) {
            user.session = session.clone();
        }
        Ok(())
    }

    async fn get_session(&self, id: UserId) -> Result<Option<Session>> {
        let inner = self.read()?;
        Ok(inner
            .users
            .iter()
            .find(|u| u.id == id)
            .and_then(|u| u.session.clone()))
    }

    async fn add_channel(&self, channel: Channel) -> Result<()> {
        self.write()?.channels.push(channel);
        Ok(())
    }

    async fn get_user_channels(&self, user_id: UserId) -> Result<Vec<Channel>> {
        let inner = self.read()?;
        Ok(inner
            .channels
            .iter()
            .filter(|c| c.user_id == user_id && c.is_active)
            .cloned()
            .collect())
    }

    async fn get_all_active_channels(&self) -> Result<Vec<Channel>> {
        let inner = self.read()?;
        Ok(inner.channels.iter().filter(|c| c.is_active).cloned().collect())
    }

    async fn set_channel_active(&self, channel_id: ChannelId, active: bool) -> Result<()> {
        self.update_channels(channel_id, |c| c.is_active = active)
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<()> {
        self.write()?.channels.retain(|c| c.channel_id != channel_id);
        Ok(())
    }

    async fn update_last_changed(&self, channel_id: ChannelId, timestamp: i64) -> Result<()> {
        self.update_channels(channel_id, |c| c.last_changed = Some(timestamp))
    }

    async fn get_channel(&self, channel_id: ChannelId) -> Result<Option<Channel>> {
        let inner = self.read()?;
        Ok(inner
            .channels
            .iter()
            .find(|c| c.channel_id == channel_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_users() {
        let store = MemoryStore::new();
        store.add_user(User::new(UserId(1), "a")).await.unwrap();
        store.add_user(User::new(UserId(2), "b")).await.unwrap();
        assert_eq!(store.total_users_count().await.unwrap(), 2);

        store.delete_user(UserId(1)).await.unwrap();
        assert!(!store.is_user_exist(UserId(1)).await.unwrap());
        assert_eq!(store.total_users_count().await.unwrap(), 1);

        let users = store.get_all_users().await.unwrap();
        assert_eq!(users[0].name, "b");
    }

    #[tokio::test]
    async fn test_session_first_match() {
        let store = MemoryStore::new();
        store.add_user(User::new(UserId(1), "a")).await.unwrap();
        store.set_session(UserId(1), Some(json!({"k": 1}))).await.unwrap();
        assert_eq!(store.get_session(UserId(1)).await.unwrap(), Some(json!({"k": 1})));
        assert_eq!(store.get_session(UserId(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stop_and_resume_all_matches() {
        let store = MemoryStore::new();
        store.add_channel(Channel::new(UserId(1), ChannelId(5), "a", 10)).await.unwrap();
        store.add_channel(Channel::new(UserId(2), ChannelId(5), "b", 10)).await.unwrap();

        store.set_channel_active(ChannelId(5), false).await.unwrap();
        assert!(store.get_all_active_channels().await.unwrap().is_empty());

        store.set_channel_active(ChannelId(5), true).await.unwrap();
        assert_eq!(store.get_all_active_channels().await.unwrap().len(), 2);

        let first = store.get_channel(ChannelId(5)).await.unwrap().unwrap();
        assert_eq!(first.base_username, "a");
    }
}
