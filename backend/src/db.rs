//! SQLite access shared by the template and contact stores.
//!
//! Connections are short-lived: each operation opens the database file, runs
//! on the blocking pool and closes it again.

use crate::error::ServiceError;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    persona TEXT PRIMARY KEY,
    title   TEXT NOT NULL,
    content TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS contacts (
    position INTEGER PRIMARY KEY,
    body     TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS uploads (
    id      INTEGER PRIMARY KEY CHECK (id = 1),
    csv_md5 TEXT NOT NULL,
    headers TEXT NOT NULL
);
";

pub fn open(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(conn)
}

/// Creates the tables if they do not exist yet.
pub fn init(path: &Path) -> Result<(), rusqlite::Error> {
    open(path)?.execute_batch(SCHEMA)
}

/// Runs `f` with a fresh connection on the blocking thread pool.
pub async fn with_connection<T, F>(path: &Path, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&mut Connection) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut conn = open(&path)?;
        f(&mut conn)
    })
    .await?
}
