//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled SQLite,
//! wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use chanwatch_core::{Channel, ChannelId, Session, User, UserId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::Store;

const USER_COLUMNS: &str = "id, name, session";
const CHANNEL_COLUMNS: &str =
    "user_id, channel_id, base_username, interval, is_active, last_changed";

/// SQLite-based store implementation.
///
/// Both collections live in one database file. The connection is shared
/// behind a mutex and every operation runs on tokio's blocking pool, so the
/// awaiting task is suspended rather than blocked.
///
/// Cloning is cheap and shares the connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::info!(path = %path.display(), "opened sqlite store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a synchronous operation against the connection on a blocking
    /// worker thread.
    ///
    /// If the awaiting task is dropped the closure still runs to completion.
    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Worker(e.to_string()))?
    }
}

// A user row with the session column still undecoded
struct UserRow {
    id: i64,
    name: String,
    session: Option<String>,
}

impl UserRow {
    fn into_user(self) -> Result<User> {
        Ok(User {
            id: UserId(self.id),
            name: self.name,
            session: decode_session(self.session.as_deref())?,
        })
    }
}

// Helper to convert a row to UserRow
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get("id")?,
        name: row.get("name")?,
        session: row.get("session")?,
    })
}

// Helper to convert a row to Channel
fn row_to_channel(row: &rusqlite::Row<'_>) -> rusqlite::Result<Channel> {
    Ok(Channel {
        user_id: UserId(row.get("user_id")?),
        channel_id: ChannelId(row.get("channel_id")?),
        base_username: row.get("base_username")?,
        interval: row.get("interval")?,
        is_active: row.get("is_active")?,
        last_changed: row.get("last_changed")?,
    })
}

/// Decode the session column. Malformed JSON is a `Serialization` error
/// wherever the column is read.
fn decode_session(raw: Option<&str>) -> Result<Option<Session>> {
    raw.map(serde_json::from_str::<Session>)
        .transpose()
        .map_err(StoreError::from)
}

fn encode_session(session: Option<&Session>) -> Result<Option<String>> {
    session
        .map(serde_json::to_string)
        .transpose()
        .map_err(StoreError::from)
}

fn query_channels(
    conn: &Connection,
    filter: &str,
    args: impl rusqlite::Params,
) -> Result<Vec<Channel>> {
    let sql = format!(
        "SELECT {} FROM channels WHERE {} ORDER BY rowid",
        CHANNEL_COLUMNS, filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let channels = stmt
        .query_map(args, row_to_channel)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(channels)
}

#[async_trait]
impl Store for SqliteStore {
    async fn add_user(&self, user: User) -> Result<()> {
        self.run(move |conn| {
            let session = encode_session(user.session.as_ref())?;
            conn.execute(
                "INSERT INTO users (id, name, session) VALUES (?1, ?2, ?3)",
                params![user.id.get(), user.name, session],
            )?;
            Ok(())
        })
        .await
    }

    async fn is_user_exist(&self, id: UserId) -> Result<bool> {
        self.run(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                params![id.get()],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn total_users_count(&self) -> Result<u64> {
        self.run(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        self.run(|conn| {
            let sql = format!("SELECT {} FROM users ORDER BY rowid", USER_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], row_to_user)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.into_iter().map(UserRow::into_user).collect()
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.run(move |conn| {
            conn.execute("DELETE FROM users WHERE id = ?1", params![id.get()])?;
            Ok(())
        })
        .await
    }

    async fn set_session(&self, id: UserId, session: Option<Session>) -> Result<()> {
        self.run(move |conn| {
            let session = encode_session(session.as_ref())?;
            conn.execute(
                "UPDATE users SET session = ?1 WHERE id = ?2",
                params![session, id.get()],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_session(&self, id: UserId) -> Result<Option<Session>> {
        self.run(move |conn| {
            let raw: Option<Option<String>> = conn
                .query_row(
                    "SELECT session FROM users WHERE id = ?1 ORDER BY rowid LIMIT 1",
                    params![id.get()],
                    |row| row.get(0),
                )
                .optional()?;

            decode_session(raw.flatten().as_deref())
        })
        .await
    }

    async fn add_channel(&self, channel: Channel) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO channels (
                    user_id, channel_id, base_username, interval, is_active, last_changed
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    channel.user_id.get(),
                    channel.channel_id.get(),
                    channel.base_username,
                    channel.interval,
                    channel.is_active,
                    channel.last_changed,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_user_channels(&self, user_id: UserId) -> Result<Vec<Channel>> {
        self.run(move |conn| {
            query_channels(conn, "user_id = ?1 AND is_active = 1", params![user_id.get()])
        })
        .await
    }

    async fn get_all_active_channels(&self) -> Result<Vec<Channel>> {
        self.run(|conn| query_channels(conn, "is_active = 1", [])).await
    }

    async fn set_channel_active(&self, channel_id: ChannelId, active: bool) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "UPDATE channels SET is_active = ?1 WHERE channel_id = ?2",
                params![active, channel_id.get()],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "DELETE FROM channels WHERE channel_id = ?1",
                params![channel_id.get()],
            )?;
            Ok(())
        })
        .await
    }

    async fn update_last_changed(&self, channel_id: ChannelId, timestamp: i64) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "UPDATE channels SET last_changed = ?1 WHERE channel_id = ?2",
                params![timestamp, channel_id.get()],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_channel(&self, channel_id: ChannelId) -> Result<Option<Channel>> {
        self.run(move |conn| {
            let sql = format!(
                "SELECT {} FROM channels WHERE channel_id = ?1 ORDER BY rowid LIMIT 1",
                CHANNEL_COLUMNS
            );
            conn.query_row(&sql, params![channel_id.get()], row_to_channel)
                .optional()
                .map_err(StoreError::from)
        })
        .await
    }
}
