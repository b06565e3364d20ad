use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migration completed.");
        }

        if *show_info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            info("Running integrity check…");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {integrity}"));
            }
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
