use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::completion::{completion_pct, format_pct};
use crate::core::cause::CauseLogic;
use crate::core::machine::MachineLogic;
use crate::core::record::RecordLogic;
use crate::errors::{AppError, AppResult};
use crate::models::production::ShiftEntry;
use crate::ui::messages::success;
use crate::utils::colors::colorize_completion;
use crate::utils::date;

/// Parse one `--downtime CAUSE=HOURS` argument.
fn parse_downtime(arg: &str) -> AppResult<(String, f64)> {
    let (cause, hours) = arg.rsplit_once('=').ok_or_else(|| {
        AppError::Validation(format!("invalid downtime '{arg}', expected CAUSE=HOURS"))
    })?;

    let hours: f64 = hours.trim().parse().map_err(|_| {
        AppError::Validation(format!("invalid downtime hours in '{arg}'"))
    })?;

    Ok((cause.trim().to_string(), hours))
}

/// Record (or update) one shift.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        date: date_str,
        machine,
        shift,
        target,
        actual,
        downtime,
        obs,
    } = cmd
    {
        let d = date::require_date(date_str)?;
        let s = super::parse_shift(shift)?;

        let mut pool = super::open_db(cfg)?;
        let m = MachineLogic::resolve(&pool, machine)?;
        let catalog = CauseLogic::load_catalog(&pool)?;

        let mut entry = ShiftEntry::new(m.id, d, s, *target, *actual);
        for arg in downtime {
            let (cause, hours) = parse_downtime(arg)?;
            entry = entry.with_downtime(&cause, hours);
        }
        if let Some(text) = obs {
            entry = entry.with_observation(text);
        }

        let id = RecordLogic::record_shift(&mut pool, &catalog, &entry)?;

        let pct = completion_pct(*target, *actual);
        success(format!(
            "Saved record #{id}: {} {} {} ({}/{}, {})",
            m.name,
            d,
            s.label(),
            target,
            actual,
            colorize_completion(&format_pct(pct, &cfg.placeholder), pct)
        ));
    }

    Ok(())
}

