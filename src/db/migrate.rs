use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The single-file layout used before this tool existed: French column
/// names, free-text shifts, no natural-key constraint.
fn is_legacy_layout(conn: &Connection) -> AppResult<bool> {
    Ok(table_exists(conn, "machines")? && table_has_column(conn, "machines", "nom")?)
}

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS machines (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT NOT NULL UNIQUE CHECK(length(trim(name)) > 0)
    );

    CREATE TABLE IF NOT EXISTS production_records (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        machine_id  INTEGER NOT NULL REFERENCES machines(id),
        date        TEXT NOT NULL,
        shift       TEXT NOT NULL CHECK(shift IN ('morning','afternoon','night')),
        target      INTEGER NOT NULL CHECK(target >= 0),
        actual      INTEGER NOT NULL CHECK(actual >= 0),
        UNIQUE(machine_id, date, shift)
    );

    CREATE INDEX IF NOT EXISTS idx_production_date_shift ON production_records(date, shift);

    CREATE TABLE IF NOT EXISTS downtime_entries (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        production_id   INTEGER NOT NULL REFERENCES production_records(id) ON DELETE CASCADE,
        cause           TEXT NOT NULL,
        duration_hours  REAL NOT NULL CHECK(duration_hours > 0)
    );

    CREATE INDEX IF NOT EXISTS idx_downtime_production ON downtime_entries(production_id);

    CREATE TABLE IF NOT EXISTS observations (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        production_id  INTEGER NOT NULL UNIQUE REFERENCES production_records(id) ON DELETE CASCADE,
        comment        TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS downtime_causes (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT NOT NULL UNIQUE
    );
"#;

fn create_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Zip the database file next to itself before a destructive migration.
fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_legacy_import.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .ok_or_else(|| AppError::Migration(format!("no parent directory for {db_path}")))?
        .join(&backup_name);

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| AppError::Migration(format!("Backup failed (start_file): {e}")))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;

    zip.finish()
        .map_err(|e| AppError::Migration(format!("Backup failed (finish): {e}")))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Move a legacy database into the current schema.
///
/// Duplicate (machine, date, shift) rows keep the highest id, children
/// follow their kept parent, zero durations and blank comments are dropped.
fn migrate_legacy_layout(conn: &Connection) -> AppResult<()> {
    warning("Legacy production layout detected, importing into the current schema...");

    // Older files may miss the child tables: give them the legacy shape.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS production (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            machine_id INTEGER, date TEXT, shift TEXT, objectif INTEGER, realise INTEGER
        );
        CREATE TABLE IF NOT EXISTS arrets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            production_id INTEGER, type TEXT, duree REAL
        );
        CREATE TABLE IF NOT EXISTS observations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            production_id INTEGER, commentaire TEXT
        );
        "#,
    )?;

    conn.execute_batch(&format!(
        r#"
        PRAGMA foreign_keys=OFF;
        BEGIN;

        ALTER TABLE machines RENAME TO legacy_machines;
        ALTER TABLE production RENAME TO legacy_production;
        ALTER TABLE arrets RENAME TO legacy_arrets;
        ALTER TABLE observations RENAME TO legacy_observations;

        {SCHEMA_SQL}

        INSERT OR IGNORE INTO machines (id, name)
        SELECT id, trim(nom) FROM legacy_machines
        WHERE nom IS NOT NULL AND trim(nom) <> '';

        INSERT INTO production_records (id, machine_id, date, shift, target, actual)
        SELECT p.id,
               p.machine_id,
               p.date,
               CASE p.shift
                   WHEN 'matin' THEN 'morning'
                   WHEN 'après-midi' THEN 'afternoon'
                   WHEN 'nuit' THEN 'night'
                   ELSE p.shift
               END,
               max(COALESCE(p.objectif, 0), 0),
               max(COALESCE(p.realise, 0), 0)
        FROM legacy_production p
        WHERE p.id IN (
                SELECT MAX(id) FROM legacy_production
                GROUP BY machine_id, date, shift
              )
          AND p.shift IN ('matin', 'après-midi', 'nuit', 'morning', 'afternoon', 'night')
          AND p.machine_id IN (SELECT id FROM machines);

        INSERT INTO downtime_entries (production_id, cause, duration_hours)
        SELECT production_id, type, duree FROM legacy_arrets
        WHERE duree > 0
          AND type IS NOT NULL
          AND production_id IN (SELECT id FROM production_records)
        ORDER BY id;

        INSERT INTO observations (production_id, comment)
        SELECT production_id, trim(commentaire) FROM legacy_observations
        WHERE id IN (SELECT MAX(id) FROM legacy_observations GROUP BY production_id)
          AND commentaire IS NOT NULL
          AND trim(commentaire) <> ''
          AND production_id IN (SELECT id FROM production_records);

        DROP TABLE legacy_observations;
        DROP TABLE legacy_arrets;
        DROP TABLE legacy_production;
        DROP TABLE legacy_machines;

        COMMIT;
        PRAGMA foreign_keys=ON;
        "#
    ))?;

    mark_applied(conn, "legacy_import", "Imported legacy production layout")?;
    success("Legacy production data imported.");
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Every cause already used by a downtime entry must be part of the catalog,
/// otherwise those entries could never be edited again.
fn migrate_backfill_cause_catalog(conn: &Connection) -> AppResult<()> {
    let version = "20250412_0002_backfill_cause_catalog";

    if is_applied(conn, version)? {
        return Ok(());
    }

    let added = conn.execute(
        "INSERT OR IGNORE INTO downtime_causes (name)
         SELECT DISTINCT cause FROM downtime_entries ORDER BY cause",
        [],
    )?;

    mark_applied(conn, version, "Backfilled downtime_causes from downtime_entries")?;

    if added > 0 {
        success(format!(
            "Migration applied: {} → {} cause(s) added to the catalog",
            version, added
        ));
    }

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Legacy layout → safety backup, then import
    if is_legacy_layout(conn)? {
        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path, backup skipped.");
        }

        migrate_legacy_layout(conn)?;
    }

    // 3) Current schema (idempotent)
    create_schema(conn)?;

    // 4) Versioned data migrations
    migrate_backfill_cause_catalog(conn)?;

    Ok(())
}
