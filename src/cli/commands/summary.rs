use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::models::filter::MachineFilter;
use crate::ui::messages::{header, info};
use crate::ui::render::summary_table;
use crate::utils::date;

/// `summary` and `history`: per-record views.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Summary {
            date: date_str,
            shift,
            machine,
        } => {
            let d = date::require_date(date_str)?;
            let s = super::parse_shift(shift)?;
            let filter = MachineFilter::from_arg(machine.as_deref());

            let pool = super::open_db(cfg)?;
            let rows = ReportLogic::shift_summary(&pool, d, s, &filter)?;

            header(format!("{} shift, {}", s.label(), d));
            if rows.is_empty() {
                info("No production recorded for this shift.");
            } else {
                print!("{}", summary_table(&rows, &cfg.placeholder, false).render());
            }
        }

        Commands::History {
            machine,
            shift,
            date: date_str,
        } => {
            let d = date_str.as_deref().map(date::require_date).transpose()?;
            let s = shift.as_deref().map(super::parse_shift).transpose()?;
            let filter = MachineFilter::from_arg(machine.as_deref());

            let pool = super::open_db(cfg)?;
            let rows = ReportLogic::history(&pool, &filter, s, d)?;

            header("History");
            if rows.is_empty() {
                info("No records match the selection.");
            } else {
                print!("{}", summary_table(&rows, &cfg.placeholder, true).render());
            }
        }

        _ => {}
    }

    Ok(())
}
