pub mod backup;
pub mod cause;
pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod init;
pub mod log;
pub mod machine;
pub mod record;
pub mod report;
pub mod summary;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::shift::Shift;

/// Open the configured database with its schema up to date and the default
/// machines and causes present.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn, cfg)?;
    Ok(pool)
}

pub(crate) fn parse_shift(s: &str) -> AppResult<Shift> {
    Shift::from_code(s).ok_or_else(|| AppError::InvalidShift(s.to_string()))
}
