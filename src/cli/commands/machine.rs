use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::machine::MachineLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Machine { add, list } = cmd {
        let mut pool = super::open_db(cfg)?;

        if let Some(name) = add {
            let id = MachineLogic::add(&mut pool, name)?;
            success(format!("Machine '{}' added (id {id}).", name.trim()));
        }

        if *list || add.is_none() {
            let machines = MachineLogic::list(&pool)?;
            if machines.is_empty() {
                info("No machines registered.");
            } else {
                println!("Machines:");
                for m in machines {
                    println!("  {:>3}  {}", m.id, m.name);
                }
            }
        }
    }

    Ok(())
}
