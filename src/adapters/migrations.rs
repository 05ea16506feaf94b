use crate::utils::error::{Result, SpaceTravelError};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

// Foreign keys are declared without ON DELETE CASCADE: the services delete
// dependent tickets before the referenced row.
const V1_CREATE_TABLES: &str = r#"
CREATE TABLE client (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE planet (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE ticket (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at_ms INTEGER NOT NULL,
    client_id INTEGER NOT NULL REFERENCES client (id),
    from_planet_id TEXT NOT NULL REFERENCES planet (id),
    to_planet_id TEXT NOT NULL REFERENCES planet (id),
    CHECK (from_planet_id <> to_planet_id)
);
"#;

const V2_TICKET_INDEXES: &str = r#"
CREATE INDEX idx_ticket_client ON ticket (client_id);
CREATE INDEX idx_ticket_from_planet ON ticket (from_planet_id);
CREATE INDEX idx_ticket_to_planet ON ticket (to_planet_id);
CREATE INDEX idx_ticket_created_at ON ticket (created_at_ms);
"#;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create client, planet and ticket tables",
        sql: V1_CREATE_TABLES,
    },
    Migration {
        version: 2,
        description: "index ticket foreign keys and creation time",
        sql: V2_TICKET_INDEXES,
    },
];

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

pub fn current_version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Applies every migration newer than `PRAGMA user_version`, one
/// transaction per migration, and returns the resulting version.
pub fn migrate(conn: &mut Connection) -> Result<u32> {
    let applied = current_version(conn)?;
    let mut version = applied;
    let latest = latest_version();

    if version > latest {
        return Err(SpaceTravelError::Config {
            message: format!(
                "database schema version {} is newer than supported version {}",
                version, latest
            ),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > applied) {
        tracing::info!(
            "Applying migration V{}: {}",
            migration.version,
            migration.description
        );
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;
        version = migration.version;
    }

    Ok(version)
}
