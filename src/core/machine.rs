use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_machine_by_name, insert_machine, load_machines};
use crate::errors::{AppError, AppResult};
use crate::models::machine::{Machine, MachineId};

pub struct MachineLogic;

impl MachineLogic {
    /// Register a machine. The name is trimmed; an exact (case-sensitive)
    /// duplicate is refused and leaves the table untouched.
    pub fn add(pool: &mut DbPool, name: &str) -> AppResult<MachineId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("machine name cannot be empty".into()));
        }

        let tx = pool.write_tx()?;

        if find_machine_by_name(&tx, name)?.is_some() {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        let id = insert_machine(&tx, name)?;
        ttlog(&tx, "machine_add", name, &format!("Machine '{name}' added (id {id})"))?;

        tx.commit()?;
        Ok(id)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Machine>> {
        load_machines(&pool.conn)
    }

    /// Resolve a machine name given on the command line.
    pub fn resolve(pool: &DbPool, name: &str) -> AppResult<Machine> {
        find_machine_by_name(&pool.conn, name.trim())?
            .ok_or_else(|| AppError::MachineNotFound(name.to_string()))
    }
}
