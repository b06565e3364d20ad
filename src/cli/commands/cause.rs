use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::cause::CauseLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Cause { add, list } = cmd {
        let mut pool = super::open_db(cfg)?;
        let mut catalog = CauseLogic::load_catalog(&pool)?;

        if let Some(name) = add {
            let before = catalog.len();
            CauseLogic::add(&mut pool, &mut catalog, name)?;
            if catalog.len() > before {
                success(format!("Downtime cause '{}' added.", name.trim()));
            } else {
                info(format!("Downtime cause '{}' already exists.", name.trim()));
            }
        }

        if *list || add.is_none() {
            println!("Downtime causes:");
            for c in catalog.iter() {
                println!("  - {c}");
            }
        }
    }

    Ok(())
}
