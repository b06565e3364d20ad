use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_record_cascade, find_machine_by_name, find_record_id, load_record, machine_name,
};
use crate::errors::{AppError, AppResult};
use crate::models::production::RecordId;
use crate::models::shift::Shift;
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete a production record with its downtime entries and observation.
    pub fn apply(pool: &mut DbPool, record_id: RecordId) -> AppResult<()> {
        let tx = pool.write_tx()?;

        let record = load_record(&tx, record_id)?
            .ok_or_else(|| AppError::RecordNotFound(format!("id {record_id}")))?;

        let machine = machine_name(&tx, record.machine_id)?.unwrap_or_default();

        delete_record_cascade(&tx, record_id)?;

        ttlog(
            &tx,
            "del",
            &format!("{} {} {}", machine, record.date, record.shift.to_db_str()),
            &format!(
                "Deleted record {} (target={} actual={})",
                record_id, record.target, record.actual
            ),
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Resolve the natural key, then delete. Returns the removed record id.
    pub fn apply_by_key(
        pool: &mut DbPool,
        machine: &str,
        date: NaiveDate,
        shift: Shift,
    ) -> AppResult<RecordId> {
        let m = find_machine_by_name(&pool.conn, machine.trim())?
            .ok_or_else(|| AppError::MachineNotFound(machine.to_string()))?;

        let id = find_record_id(&pool.conn, m.id, &date, shift)?.ok_or_else(|| {
            AppError::RecordNotFound(format!("{} {} {}", m.name, date, shift.to_db_str()))
        })?;

        Self::apply(pool, id)?;
        Ok(id)
    }
}
