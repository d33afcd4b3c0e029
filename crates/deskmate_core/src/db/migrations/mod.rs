//! Ordered schema steps for the key-value database.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// One schema step. `version` is the `user_version` after the step commits.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    sql: &'static str,
}

const STEPS: &[Migration] = &[Migration {
    version: 1,
    name: "kv_entries",
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Schema version this build migrates databases to.
pub fn target_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the database up to `target_version()` and returns the version it
/// ended at.
pub fn migrate(conn: &mut Connection) -> DbResult<u32> {
    run_steps(conn, STEPS)
}

fn run_steps(conn: &mut Connection, steps: &[Migration]) -> DbResult<u32> {
    let found = schema_version(conn)?;
    let supported = steps.last().map_or(0, |step| step.version);
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let mut applied = 0usize;
    for step in steps.iter().filter(|step| step.version > found) {
        apply_step(conn, step).map_err(|source| DbError::Migration {
            version: step.version,
            name: step.name,
            source,
        })?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
        applied += 1;
    }

    if applied > 0 {
        info!(
            "event=db_migrate module=db status=ok from_version={found} to_version={supported} steps={applied}"
        );
    }
    Ok(supported)
}

fn apply_step(conn: &mut Connection, step: &Migration) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    tx.commit()
}
