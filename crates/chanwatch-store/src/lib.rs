//! # Chanwatch Store
//!
//! Storage abstraction for chanwatch. Provides a trait-based interface
//! for user and channel persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The [`Store`] trait hides the backing engine from callers. The primary
//! implementation is [`SqliteStore`], which keeps both collections in a
//! single file; [`MemoryStore`] has the same semantics and is meant for tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chanwatch_core::{User, UserId};
//! use chanwatch_store::{SqliteStore, Store};
//!
//! async fn example() {
//!     let store = SqliteStore::open("chanwatch.db").unwrap();
//!     store.add_user(User::new(UserId(42), "alice")).await.unwrap();
//!     assert!(store.is_user_exist(UserId(42)).await.unwrap());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **No uniqueness**: inserting a duplicate id is accepted; callers own that invariant
//! - **First match wins**: single-record lookups return the earliest inserted match
//! - **Updates fan out**: updates and deletes touch every matching record
//! - **Absent is not an error**: missing records come back as `None` or empty

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::Store;
