use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date: date_str,
        machine,
        shift,
        yes,
    } = cmd
    {
        let d = date::require_date(date_str)?;
        let s = super::parse_shift(shift)?;

        let prompt = format!(
            "Delete the {} shift of {} on {}? This action is irreversible.",
            s.label(),
            machine,
            d
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = super::open_db(cfg)?;
        let id = DeleteLogic::apply_by_key(&mut pool, machine, d, s)?;

        success(format!(
            "Record #{id} ({machine}, {d}, {}) has been deleted.",
            s.label()
        ));
    }

    Ok(())
}
