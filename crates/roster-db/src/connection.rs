use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use roster_data::Result;

use crate::schema;

/// A thread safe connection to the database
#[derive(Debug, Clone)]
pub struct Connection(Arc<Mutex<SqliteConnection>>);

/// Removes the test database when dropped
pub struct TestHandle {
    path: PathBuf,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

impl TestHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Connection {
    /// Open a connection to the database, creating the
    /// database file if missing. The filename is taken
    /// as a plain path, not as a connection URL.
    pub async fn open(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::new()
            .filename(filename)
            .create_if_missing(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        tracing::debug!(filename, "opened members database");
        Ok(Self(Arc::new(Mutex::new(conn))))
    }

    /// Open a new test database connection.
    /// The database will be created on each open.
    pub async fn open_test() -> (TestHandle, Self) {
        let path = std::env::temp_dir().join(format!(
            "roster_test_{}.sqlite3",
            rand::random::<u64>()
        ));
        let handle = TestHandle { path: path.clone() };
        let conn = Self::open(&path.to_string_lossy()).await.unwrap();

        // Install the schema
        schema::install(&conn).await.unwrap();

        (handle, conn)
    }

    /// Acquire exclusive use of the underlying connection
    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.0.lock().await
    }
}
