//! # Chanwatch
//!
//! Async persistence for a channel-watching bot: registered users (with an
//! opaque session each) and the channels they monitor.
//!
//! ## Overview
//!
//! [`Database`] is the whole public surface. It owns two collections,
//! `users` and `channels`, kept in one SQLite file. Each method performs a
//! single lookup, insert, update or delete on a blocking worker thread and
//! suspends the caller until it finishes.
//!
//! Ids may be passed as integers or numeric strings; both address the same
//! record.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chanwatch::{Database, DatabaseConfig};
//!
//! async fn example() {
//!     let db = Database::open(&DatabaseConfig::from_env()).unwrap();
//!
//!     db.add_user(42, "alice").await.unwrap();
//!     db.add_channel("42", -100123, "somechannel", 60).await.unwrap();
//!
//!     for channel in db.get_all_active_channels().await.unwrap() {
//!         println!("{} every {}", channel.base_username, channel.interval);
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `chanwatch::core` - Record and id types
//! - `chanwatch::store` - Storage abstraction, SQLite and in-memory backends

pub mod config;
pub mod database;
pub mod error;

pub use chanwatch_core as core;
pub use chanwatch_store as store;

pub use config::DatabaseConfig;
pub use database::Database;
pub use error::{DatabaseError, Result};

pub use chanwatch_core::{Channel, ChannelId, IdError, IntoId, Session, User, UserId};
pub use chanwatch_store::{MemoryStore, SqliteStore, Store, StoreError};
