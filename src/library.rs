//! Read-only access to the media library.
//!
//! The matcher only needs one capability: case-insensitive equality lookups
//! on `title` with optional `artist` and `album` filters. `SqliteLibrary`
//! answers them from a Navidrome database, `MemoryLibrary` from a plain list.

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::models::{LibraryRecord, Lookup};

/// Default location of the Navidrome database.
pub const DEFAULT_DATABASE_PATH: &str = "/var/lib/navidrome/data/navidrome.db";

/// Query capability the matcher runs against.
pub trait Library {
    /// Rows whose fields equal the query fields, ignoring case.
    /// Row order is whatever the store returns.
    fn lookup(&self, query: &Lookup<'_>) -> Result<Vec<LibraryRecord>>;
}

impl<L: Library + ?Sized> Library for &L {
    fn lookup(&self, query: &Lookup<'_>) -> Result<Vec<LibraryRecord>> {
        (**self).lookup(query)
    }
}

// ============================================================================
// SQLite
// ============================================================================

/// `media_file` table of a Navidrome database.
pub struct SqliteLibrary {
    conn: Connection,
}

impl SqliteLibrary {
    /// Open an existing database read-only. A missing file is an error.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open library database {:?}", path))?;
        Ok(Self::new(conn))
    }

    /// Wrap an already open connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn build_sql(query: &Lookup<'_>) -> String {
        let mut sql = String::from(
            "SELECT CAST(id AS TEXT), path, title, artist, album
             FROM media_file
             WHERE title = ?1 COLLATE NOCASE",
        );
        let mut n = 1;
        if query.artist.is_some() {
            n += 1;
            sql.push_str(&format!(" AND artist = ?{} COLLATE NOCASE", n));
        }
        if query.album.is_some() {
            n += 1;
            sql.push_str(&format!(" AND album = ?{} COLLATE NOCASE", n));
        }
        sql
    }
}

impl Library for SqliteLibrary {
    fn lookup(&self, query: &Lookup<'_>) -> Result<Vec<LibraryRecord>> {
        let sql = Self::build_sql(query);
        let mut stmt = self.conn.prepare_cached(&sql)?;

        let mut params: Vec<&dyn rusqlite::ToSql> = vec![&query.title];
        if let Some(artist) = &query.artist {
            params.push(artist);
        }
        if let Some(album) = &query.album {
            params.push(album);
        }

        let mut rows = stmt
            .query(params.as_slice())
            .with_context(|| format!("Library query failed ({})", query))?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let title: Option<String> = row.get(2)?;
            let artist: Option<String> = row.get(3)?;
            let album: Option<String> = row.get(4)?;
            records.push(LibraryRecord {
                id: row.get(0)?,
                path: row.get(1)?,
                title: title.unwrap_or_default(),
                artist: artist.unwrap_or_default(),
                album: album.unwrap_or_default(),
            });
        }
        Ok(records)
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Library held in a `Vec`, compared with lowercase equality.
#[derive(Debug, Default, Clone)]
pub struct MemoryLibrary {
    records: Vec<LibraryRecord>,
}

impl MemoryLibrary {
    pub fn new(records: Vec<LibraryRecord>) -> Self {
        Self { records }
    }
}

fn eq_nocase(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Library for MemoryLibrary {
    fn lookup(&self, query: &Lookup<'_>) -> Result<Vec<LibraryRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| eq_nocase(&r.title, query.title))
            .filter(|r| query.artist.map_or(true, |a| eq_nocase(&r.artist, a)))
            .filter(|r| query.album.map_or(true, |a| eq_nocase(&r.album, a)))
            .cloned()
            .collect())
    }
}
