pub mod queries;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};

/// Open the shared events database. The catalog belongs to another service,
/// so the connection is read-only.
pub fn open_catalog(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open catalog database: {path}"))?;

    conn.busy_timeout(std::time::Duration::from_secs(5))
        .context("failed to set busy timeout")?;

    Ok(conn)
}
