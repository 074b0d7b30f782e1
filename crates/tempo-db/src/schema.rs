//! SQL schema definitions.

/// Complete schema for the Tempo v1 database.
///
/// A single string-keyed preference table. Structured values (the
/// credential and profile maps) are stored as JSON blobs under one key
/// each, so reads and writes of a whole collection stay atomic at the
/// row level.
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS prefs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
