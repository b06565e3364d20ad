use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::queries::{insert_cause_if_absent, insert_machine_if_absent};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database: schema through the migration engine, then the
/// configured default machines and causes.
///
/// Safe on every startup: seeding is "insert if absent" on the unique names.
pub fn init_db(conn: &Connection, cfg: &Config) -> AppResult<()> {
    run_pending_migrations(conn)?;
    seed_defaults(conn, &cfg.default_machines, &cfg.default_causes)?;
    Ok(())
}

/// Returns how many (machines, causes) were created.
pub fn seed_defaults(
    conn: &Connection,
    machines: &[String],
    causes: &[String],
) -> AppResult<(usize, usize)> {
    let tx = conn.unchecked_transaction()?;

    let mut new_machines = 0;
    for m in machines.iter().map(|m| m.trim()).filter(|m| !m.is_empty()) {
        if insert_machine_if_absent(&tx, m)? {
            new_machines += 1;
        }
    }

    let mut new_causes = 0;
    for c in causes.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        if insert_cause_if_absent(&tx, c)? {
            new_causes += 1;
        }
    }

    tx.commit()?;
    Ok((new_machines, new_causes))
}
