//! `SQLite` storage implementation.

// SQLite stores all integers as i64. These casts are intentional and safe
// because we only store non-negative values that fit in usize.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use crate::core::buffer::current_timestamp;
use crate::core::{BufferMetadata, ContentBuffer, FeatureArea, Identity, QaPair, is_reserved};
use crate::error::{Result, StorageError};
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CURRENT_SCHEMA_VERSION, GET_VERSION_SQL, SCHEMA_SQL, SET_VERSION_SQL,
};
use crate::storage::traits::{FaqRecord, FaqSource, Storage, StorageStats};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};
use tracing::debug;

const BUFFER_COLUMNS: &str = "id, name, area, content, size, created_at, updated_at";

/// Upserts the singleton session row, keeping its creation time.
fn write_identity(conn: &Connection, identity: &Identity) -> Result<()> {
    let data = serde_json::to_string(identity).map_err(StorageError::from)?;
    let now = current_timestamp();

    conn.execute(
        r"
        INSERT OR REPLACE INTO session (id, identity, created_at, updated_at)
        VALUES (1, ?, COALESCE((SELECT created_at FROM session WHERE id = 1), ?), ?)
    ",
        params![data, now, now],
    )
    .map_err(StorageError::from)?;

    Ok(())
}

/// SQLite-based session storage.
///
/// # Examples
///
/// ```no_run
/// use healthfaq::storage::{SqliteStorage, Storage};
///
/// let mut storage = SqliteStorage::open(".healthfaq/session.db").unwrap();
/// storage.init().unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;

        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn get_schema_version(&self) -> Result<Option<u32>> {
        let version: Option<String> = self
            .conn
            .query_row(GET_VERSION_SQL, [], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        Ok(version.and_then(|v| v.parse().ok()))
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn
            .execute(SET_VERSION_SQL, params![version.to_string()])
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }

    fn buffer_from_row(row: &Row<'_>) -> rusqlite::Result<ContentBuffer> {
        Ok(ContentBuffer {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            area: parse_area(row.get(2)?),
            text: row.get(3)?,
            metadata: BufferMetadata {
                size: row.get::<_, i64>(4)? as usize,
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            },
        })
    }
}

fn parse_area(value: Option<String>) -> Option<FeatureArea> {
    value.and_then(|s| s.parse().ok())
}

impl Storage for SqliteStorage {
    fn init(&mut self) -> Result<()> {
        let is_init: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;

        if is_init == 0 {
            self.conn
                .execute_batch(SCHEMA_SQL)
                .map_err(StorageError::from)?;
            self.set_schema_version(CURRENT_SCHEMA_VERSION)?;
            debug!(version = CURRENT_SCHEMA_VERSION, "created schema");
        } else if let Some(found) = self.get_schema_version()?
            && found != CURRENT_SCHEMA_VERSION
        {
            return Err(StorageError::UnsupportedSchema {
                found,
                expected: CURRENT_SCHEMA_VERSION,
            }
            .into());
        }

        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.count(CHECK_SCHEMA_SQL)? > 0)
    }

    fn reset(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            DELETE FROM faq_history;
            DELETE FROM buffers;
            DELETE FROM session;
        ",
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    // ==================== Identity Operations ====================

    fn load_identity(&self) -> Result<Identity> {
        let data: Option<String> = self
            .conn
            .query_row("SELECT identity FROM session WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(StorageError::from)?;

        match data {
            Some(json) => Ok(serde_json::from_str(&json).map_err(StorageError::from)?),
            None => Ok(Identity::default()),
        }
    }

    fn save_identity(&mut self, identity: &Identity) -> Result<()> {
        write_identity(&self.conn, identity)
    }

    // ==================== Buffer Operations ====================

    fn put_buffer(&mut self, name: &str, area: Option<FeatureArea>, text: &str) -> Result<i64> {
        if is_reserved(name) {
            return Err(StorageError::ReservedName {
                name: name.to_string(),
            }
            .into());
        }

        let now = current_timestamp();
        self.conn
            .execute(
                r"
            INSERT INTO buffers (name, area, content, size, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT(name) DO UPDATE SET
                area = excluded.area,
                content = excluded.content,
                size = excluded.size,
                updated_at = excluded.updated_at
        ",
                params![name, area.map(FeatureArea::as_str), text, text.len() as i64, now],
            )
            .map_err(StorageError::from)?;

        let id: i64 = self
            .conn
            .query_row(
                "SELECT id FROM buffers WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .map_err(StorageError::from)?;
        debug!(name, id, bytes = text.len(), "stored buffer");

        Ok(id)
    }

    fn get_buffer(&self, name: &str) -> Result<Option<ContentBuffer>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {BUFFER_COLUMNS} FROM buffers WHERE name = ?"),
                params![name],
                Self::buffer_from_row,
            )
            .optional()
            .map_err(StorageError::from)?;

        Ok(result)
    }

    fn list_buffers(&self) -> Result<Vec<ContentBuffer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BUFFER_COLUMNS} FROM buffers ORDER BY id"))
            .map_err(StorageError::from)?;

        let buffers = stmt
            .query_map([], Self::buffer_from_row)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(buffers)
    }

    fn clear_buffers(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM buffers", [])
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn buffer_count(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM buffers")
    }

    fn logout(&mut self) -> Result<()> {
        let tx = self.conn.transaction().map_err(StorageError::from)?;
        write_identity(&tx, &Identity::default())?;
        tx.execute("DELETE FROM buffers", [])
            .map_err(StorageError::from)?;
        tx.commit().map_err(StorageError::from)?;
        debug!("session logged out");
        Ok(())
    }

    // ==================== History Operations ====================

    fn record_faqs(&mut self, record: &FaqRecord) -> Result<i64> {
        let pairs = serde_json::to_string(&record.pairs).map_err(StorageError::from)?;

        self.conn
            .execute(
                r"
            INSERT INTO faq_history (area, source, outcome, detail, pairs, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        ",
                params![
                    record.area.map(FeatureArea::as_str),
                    record.source.as_str(),
                    record.outcome,
                    record.detail,
                    pairs,
                    record.created_at,
                ],
            )
            .map_err(StorageError::from)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_history(&self, limit: usize) -> Result<Vec<FaqRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                r"
            SELECT id, area, source, outcome, detail, pairs, created_at
            FROM faq_history ORDER BY id DESC LIMIT ?
        ",
            )
            .map_err(StorageError::from)?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i64>(6)?,
                ))
            })
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(id, area, source, outcome, detail, pairs, created_at)| -> Result<FaqRecord> {
                let pairs: Vec<QaPair> =
                    serde_json::from_str(&pairs).map_err(StorageError::from)?;
                let source = if source == FaqSource::Selected.as_str() {
                    FaqSource::Selected
                } else {
                    FaqSource::Explicit
                };
                Ok(FaqRecord {
                    id: Some(id),
                    area: parse_area(area),
                    source,
                    outcome,
                    detail,
                    pairs,
                    created_at,
                })
            })
            .collect()
    }

    fn stats(&self) -> Result<StorageStats> {
        let total_size = self.count("SELECT COALESCE(SUM(size), 0) FROM buffers")?;

        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        Ok(StorageStats {
            buffer_count: self.buffer_count()?,
            total_content_size: total_size,
            history_count: self.count("SELECT COUNT(*) FROM faq_history")?,
            logged_in: self.load_identity()?.logged_in,
            schema_version: self.get_schema_version()?.unwrap_or(0),
            db_size,
        })
    }
}
