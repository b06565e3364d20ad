use crate::core::calculator::completion::round2;
use crate::errors::{AppError, AppResult};
use crate::models::machine::{Machine, MachineId};
use crate::models::production::{CauseHours, ProductionRecord, RecordId};
use crate::models::shift::Shift;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

pub fn date_to_db(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` column, surfacing bad data as a conversion failure.
pub fn parse_db_date(idx: usize, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

pub fn parse_db_shift(idx: usize, s: &str) -> Result<Shift> {
    Shift::from_db_str(s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidShift(s.to_string())),
        )
    })
}

// ---------------------------
// Machines
// ---------------------------

pub fn load_machines(conn: &Connection) -> AppResult<Vec<Machine>> {
    let mut stmt = conn.prepare("SELECT id, name FROM machines ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Machine {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_machine_by_name(conn: &Connection, name: &str) -> AppResult<Option<Machine>> {
    let found = conn
        .query_row(
            "SELECT id, name FROM machines WHERE name = ?1",
            [name],
            |row| {
                Ok(Machine {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(found)
}

pub fn machine_name(conn: &Connection, id: MachineId) -> AppResult<Option<String>> {
    let name = conn
        .query_row("SELECT name FROM machines WHERE id = ?1", [id], |row| row.get(0))
        .optional()?;
    Ok(name)
}

pub fn insert_machine(conn: &Connection, name: &str) -> AppResult<MachineId> {
    conn.execute("INSERT INTO machines (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

/// Seed helper: returns true when the machine was actually created.
pub fn insert_machine_if_absent(conn: &Connection, name: &str) -> AppResult<bool> {
    let n = conn.execute("INSERT OR IGNORE INTO machines (name) VALUES (?1)", [name])?;
    Ok(n > 0)
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}

// ---------------------------
// Causes
// ---------------------------

/// Causes in catalog order (defaults first, then user additions).
pub fn load_causes(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM downtime_causes ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_cause_if_absent(conn: &Connection, name: &str) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO downtime_causes (name) VALUES (?1)",
        [name],
    )?;
    Ok(n > 0)
}

// ---------------------------
// Production records
// ---------------------------

pub fn map_record(row: &Row) -> Result<ProductionRecord> {
    let date_str: String = row.get("date")?;
    let shift_str: String = row.get("shift")?;

    Ok(ProductionRecord {
        id: row.get("id")?,
        machine_id: row.get("machine_id")?,
        date: parse_db_date(0, &date_str)?,
        shift: parse_db_shift(0, &shift_str)?,
        target: row.get("target")?,
        actual: row.get("actual")?,
    })
}

pub fn find_record_id(
    conn: &Connection,
    machine_id: MachineId,
    date: &NaiveDate,
    shift: Shift,
) -> AppResult<Option<RecordId>> {
    let id = conn
        .query_row(
            "SELECT id FROM production_records
             WHERE machine_id = ?1 AND date = ?2 AND shift = ?3",
            params![machine_id, date_to_db(date), shift.to_db_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn load_record(conn: &Connection, id: RecordId) -> AppResult<Option<ProductionRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM production_records WHERE id = ?1",
            [id],
            map_record,
        )
        .optional()?;
    Ok(rec)
}

pub fn insert_record(
    conn: &Connection,
    machine_id: MachineId,
    date: &NaiveDate,
    shift: Shift,
    target: i64,
    actual: i64,
) -> AppResult<RecordId> {
    conn.execute(
        "INSERT INTO production_records (machine_id, date, shift, target, actual)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![machine_id, date_to_db(date), shift.to_db_str(), target, actual],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_record_values(conn: &Connection, id: RecordId, target: i64, actual: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE production_records SET target = ?1, actual = ?2 WHERE id = ?3",
        params![target, actual, id],
    )?;
    Ok(())
}

/// Replace the full downtime set of a record: only durations still positive
/// once rounded to hundredths of an hour survive.
pub fn replace_downtime(
    conn: &Connection,
    record_id: RecordId,
    downtime: &BTreeMap<String, f64>,
) -> AppResult<usize> {
    conn.execute(
        "DELETE FROM downtime_entries WHERE production_id = ?1",
        [record_id],
    )?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO downtime_entries (production_id, cause, duration_hours)
         VALUES (?1, ?2, ?3)",
    )?;

    let mut inserted = 0;
    for (cause, hours) in downtime {
        // stored at the two-decimal precision every report shows
        let hours = round2(*hours);
        if hours > 0.0 {
            stmt.execute(params![record_id, cause, hours])?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Replace the observation of a record; blank comments leave none.
pub fn replace_observation(conn: &Connection, record_id: RecordId, comment: &str) -> AppResult<bool> {
    conn.execute(
        "DELETE FROM observations WHERE production_id = ?1",
        [record_id],
    )?;

    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO observations (production_id, comment) VALUES (?1, ?2)",
        params![record_id, trimmed],
    )?;
    Ok(true)
}

pub fn load_downtime(conn: &Connection, record_id: RecordId) -> AppResult<Vec<CauseHours>> {
    let mut stmt = conn.prepare_cached(
        "SELECT cause, duration_hours FROM downtime_entries
         WHERE production_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([record_id], |row| {
        Ok(CauseHours {
            cause: row.get(0)?,
            hours: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_observation(conn: &Connection, record_id: RecordId) -> AppResult<Option<String>> {
    let comment = conn
        .query_row(
            "SELECT comment FROM observations WHERE production_id = ?1",
            [record_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(comment)
}

/// Delete a record together with its downtime entries and observation.
/// Returns the number of production rows removed (0 or 1).
pub fn delete_record_cascade(conn: &Connection, record_id: RecordId) -> AppResult<usize> {
    conn.execute(
        "DELETE FROM downtime_entries WHERE production_id = ?1",
        [record_id],
    )?;
    conn.execute(
        "DELETE FROM observations WHERE production_id = ?1",
        [record_id],
    )?;
    let n = conn.execute("DELETE FROM production_records WHERE id = ?1", [record_id])?;
    Ok(n)
}

/// First and last recorded production date, if any record exists.
pub fn recorded_date_bounds(conn: &Connection) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let (first, last): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(date), MAX(date) FROM production_records",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match (first, last) {
        (Some(f), Some(l)) => Ok(Some((parse_db_date(0, &f)?, parse_db_date(1, &l)?))),
        _ => Ok(None),
    }
}
