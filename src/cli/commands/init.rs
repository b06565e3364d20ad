use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::seed_defaults;
use crate::db::log;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations and the default machines/causes
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    info("Initializing rShiftLog…");

    let pool = DbPool::new(&db_path)?;
    run_pending_migrations(&pool.conn)?;

    let (machines, causes) =
        seed_defaults(&pool.conn, &cfg.default_machines, &cfg.default_causes)?;
    if machines + causes > 0 {
        info(format!("Seeded {machines} machine(s) and {causes} downtime cause(s)"));
    }

    success(format!("Database initialized at {db_path}"));

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        &db_path,
        &format!("Database initialized at {db_path}"),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success("rShiftLog initialization completed!");
    Ok(())
}
