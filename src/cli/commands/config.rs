use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *check {
            ConfigLogic::check(&path)?;
        }

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor.as_deref())?;
        }
    }

    Ok(())
}
