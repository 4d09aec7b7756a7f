//! SQLite schema definition.

/// Complete database schema for hospital admin records.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Records
-- ============================================================================

-- One row per record of any kind; the record itself is a JSON body.
CREATE TABLE IF NOT EXISTS records (
    kind TEXT NOT NULL,                           -- 'appointments', 'patients', ...
    id TEXT NOT NULL,
    position INTEGER NOT NULL,                    -- insertion order within kind
    body TEXT NOT NULL CHECK (json_valid(body)),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (kind, id)
);

CREATE INDEX IF NOT EXISTS idx_records_position ON records(kind, position);

-- ============================================================================
-- Identifier counters
-- ============================================================================

-- Next sequential identifier per kind. Only ever increases, so identifiers of
-- deleted records are not handed out again.
CREATE TABLE IF NOT EXISTS id_counters (
    kind TEXT PRIMARY KEY,
    next INTEGER NOT NULL CHECK (next >= 1)
);
"#;
