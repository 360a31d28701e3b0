//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Every fixture hands out a
//! `Database<dyn Store>` so a test body can run unchanged against both
//! backends.

use std::path::PathBuf;
use std::sync::Arc;

use chanwatch::Database;
use chanwatch_store::{MemoryStore, SqliteStore, Store};
use tempfile::TempDir;

/// Which storage backend a fixture uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite,
}

impl Backend {
    /// Every backend, for tests that should hold on all of them.
    pub const ALL: [Backend; 2] = [Backend::Memory, Backend::Sqlite];

    /// Build a fresh, empty fixture on this backend.
    ///
    /// Panics if the temporary SQLite file cannot be created.
    pub fn fixture(self) -> Fixture {
        match self {
            Backend::Memory => Fixture {
                backend: self,
                db: Database::from_arc(Arc::new(MemoryStore::new()) as Arc<dyn Store>),
                dir: None,
            },
            Backend::Sqlite => {
                let dir = tempfile::tempdir().expect("create temp dir");
                let db = open_sqlite(&dir.path().join("chanwatch.db"));
                Fixture {
                    backend: self,
                    db,
                    dir: Some(dir),
                }
            }
        }
    }
}

fn open_sqlite(path: &std::path::Path) -> Database<dyn Store> {
    let store = SqliteStore::open(path).expect("open sqlite store");
    Database::from_arc(Arc::new(store) as Arc<dyn Store>)
}

/// A database plus whatever keeps its backing storage alive.
pub struct Fixture {
    pub backend: Backend,
    pub db: Database<dyn Store>,
    dir: Option<TempDir>,
}

impl Fixture {
    /// Path of the SQLite file, if this fixture has one.
    pub fn path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.path().join("chanwatch.db"))
    }

    /// Open a second handle on the same file, as a restarted process would.
    ///
    /// `None` for the memory backend, which has nothing to reopen.
    pub fn reopen(&self) -> Option<Database<dyn Store>> {
        self.path().map(|p| open_sqlite(&p))
    }

    /// Insert users `1..=n` named `user-<id>`.
    pub async fn seed_users(&self, n: i64) {
        for id in 1..=n {
            self.db
                .add_user(id, format!("user-{}", id))
                .await
                .expect("seed user");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixtures_start_empty() {
        for backend in Backend::ALL {
            let fixture = backend.fixture();
            assert_eq!(fixture.db.total_users_count().await.unwrap(), 0, "{:?}", backend);
        }
    }

    #[tokio::test]
    async fn test_seed_users() {
        let fixture = Backend::Sqlite.fixture();
        fixture.seed_users(3).await;
        assert_eq!(fixture.db.total_users_count().await.unwrap(), 3);
        assert!(fixture.reopen().is_some());
        assert!(Backend::Memory.fixture().reopen().is_none());
    }
}
