//! Layout of the slot database.
//!
//! # Invariants
//! - The layout version lives in `PRAGMA user_version`.
//! - Upgrade steps run in one transaction; a failed step leaves the file
//!   at its previous version.

use super::open::{DbError, DbResult};
use rusqlite::Connection;

/// Layout version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// `(version, sql)` steps; step `n` upgrades a version `n - 1` file.
const UPGRADE_STEPS: &[(u32, &str)] = &[(1, include_str!("kv_store_v1.sql"))];

/// Result of bringing a connection up to `SCHEMA_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaUpgrade {
    Current,
    Upgraded { from: u32, to: u32 },
}

/// Reads the layout version stored in the file.
pub fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

pub(crate) fn upgrade(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let found = stored_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(SchemaUpgrade::Current);
    }

    let tx = conn.transaction()?;
    for (_, sql) in UPGRADE_STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(SchemaUpgrade::Upgraded {
        from: found,
        to: SCHEMA_VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::{stored_version, upgrade, SchemaUpgrade, SCHEMA_VERSION, UPGRADE_STEPS};
    use rusqlite::Connection;

    #[test]
    fn last_step_matches_schema_version() {
        let versions: Vec<u32> = UPGRADE_STEPS.iter().map(|(version, _)| *version).collect();
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(versions.last().copied(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn upgrade_runs_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(
            upgrade(&mut conn).unwrap(),
            SchemaUpgrade::Upgraded {
                from: 0,
                to: SCHEMA_VERSION
            }
        );
        assert_eq!(upgrade(&mut conn).unwrap(), SchemaUpgrade::Current);
        assert_eq!(stored_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
