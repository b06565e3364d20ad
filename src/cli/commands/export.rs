use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::logic::ExportRequest;
use crate::export::ExportLogic;
use crate::models::filter::MachineFilter;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        view,
        format,
        file,
        range,
        machine,
        force,
    } = cmd
    {
        let mut pool = super::open_db(cfg)?;
        let req = ExportRequest {
            view: *view,
            format: *format,
            file,
            range: range.as_deref(),
            machine: MachineFilter::from_arg(machine.as_deref()),
            force: *force,
            placeholder: &cfg.placeholder,
        };
        ExportLogic::export(&mut pool, &req)?;
    }
    Ok(())
}
