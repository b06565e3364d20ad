use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    find_record_id, insert_record, machine_name, replace_downtime, replace_observation,
    update_record_values,
};
use crate::errors::{AppError, AppResult};
use crate::models::cause::CauseCatalog;
use crate::models::production::{RecordId, ShiftEntry};

/// High-level business logic for saving one shift.
pub struct RecordLogic;

/// Largest target or actual quantity accepted for one shift.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Reject what can be rejected without touching the store.
pub fn validate_entry(entry: &ShiftEntry, catalog: &CauseCatalog) -> AppResult<()> {
    for (label, value) in [("target", entry.target), ("actual", entry.actual)] {
        if !(0..=MAX_QUANTITY).contains(&value) {
            return Err(AppError::Validation(format!(
                "{label} must be between 0 and {MAX_QUANTITY} (got {value})"
            )));
        }
    }

    for (cause, hours) in &entry.downtime {
        if !catalog.contains(cause) {
            return Err(AppError::Validation(format!(
                "unknown downtime cause '{cause}' (add it first with `cause --add`)"
            )));
        }
        if !hours.is_finite() || *hours < 0.0 {
            return Err(AppError::Validation(format!(
                "downtime for '{cause}' must be a non-negative number of hours (got {hours})"
            )));
        }
    }

    Ok(())
}

impl RecordLogic {
    /// Create or update the record for (machine, date, shift) and replace its
    /// downtime set and observation, all in one transaction.
    pub fn record_shift(
        pool: &mut DbPool,
        catalog: &CauseCatalog,
        entry: &ShiftEntry,
    ) -> AppResult<RecordId> {
        validate_entry(entry, catalog)?;

        let tx = pool.write_tx()?;

        let machine = machine_name(&tx, entry.machine_id)?
            .ok_or_else(|| AppError::MachineNotFound(format!("id {}", entry.machine_id)))?;

        // ------------------------------------------------
        // 1️⃣ Upsert on the natural key
        // ------------------------------------------------
        let (record_id, created) =
            match find_record_id(&tx, entry.machine_id, &entry.date, entry.shift)? {
                Some(id) => {
                    update_record_values(&tx, id, entry.target, entry.actual)?;
                    (id, false)
                }
                None => {
                    let id = insert_record(
                        &tx,
                        entry.machine_id,
                        &entry.date,
                        entry.shift,
                        entry.target,
                        entry.actual,
                    )?;
                    (id, true)
                }
            };

        // ------------------------------------------------
        // 2️⃣ Replace children
        // ------------------------------------------------
        let stops = replace_downtime(&tx, record_id, &entry.downtime)?;
        let has_obs = replace_observation(&tx, record_id, &entry.observation)?;

        // ------------------------------------------------
        // 3️⃣ Audit
        // ------------------------------------------------
        ttlog(
            &tx,
            if created { "record" } else { "update" },
            &format!("{} {} {}", machine, entry.date, entry.shift.to_db_str()),
            &format!(
                "target={} actual={} downtime_causes={} observation={}",
                entry.target,
                entry.actual,
                stops,
                if has_obs { "yes" } else { "no" }
            ),
        )?;

        tx.commit()?;
        Ok(record_id)
    }
}
