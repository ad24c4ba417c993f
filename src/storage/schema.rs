//! Database schema definitions.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Session identity
CREATE TABLE IF NOT EXISTS session (
    id INTEGER PRIMARY KEY CHECK (id = 1),  -- Singleton
    identity TEXT NOT NULL,  -- JSON serialized Identity
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Session buffers; row id order is insertion order
CREATE TABLE IF NOT EXISTS buffers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    area TEXT,
    content TEXT NOT NULL,
    size INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Generated FAQ runs
CREATE TABLE IF NOT EXISTS faq_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    area TEXT,
    source TEXT NOT NULL,
    outcome TEXT NOT NULL,
    detail TEXT NOT NULL,
    pairs TEXT NOT NULL,  -- JSON array of QaPair
    created_at INTEGER NOT NULL
);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";
