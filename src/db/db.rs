use anyhow::Result;
use rusqlite::Connection;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the SQLite database file.
///
/// When it is unset the application runs against the text store instead;
/// its absence is configuration, not an error.
pub const DATABASE_ENV: &str = "SPENT_DATABASE";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens a fresh connection to the given database file.
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;

        Ok(Db { conn })
    }

    /// The configured database target, if any.
    pub fn target() -> Option<PathBuf> {
        env::var(DATABASE_ENV).ok().filter(|value| !value.is_empty()).map(PathBuf::from)
    }
}
