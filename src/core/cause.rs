use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_cause_if_absent, load_causes};
use crate::errors::{AppError, AppResult};
use crate::models::cause::CauseCatalog;

pub struct CauseLogic;

impl CauseLogic {
    /// Load the persisted catalog, defaults first.
    pub fn load_catalog(pool: &DbPool) -> AppResult<CauseCatalog> {
        Ok(CauseCatalog::new(load_causes(&pool.conn)?))
    }

    /// Extend the catalog both on disk and in the caller's value.
    /// Adding a cause that is already known succeeds without changes.
    pub fn add(pool: &mut DbPool, catalog: &mut CauseCatalog, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("cause name cannot be empty".into()));
        }

        let tx = pool.write_tx()?;
        if insert_cause_if_absent(&tx, name)? {
            ttlog(&tx, "cause_add", name, &format!("Downtime cause '{name}' added"))?;
        }
        tx.commit()?;

        catalog.push(name.to_string());
        Ok(())
    }
}
