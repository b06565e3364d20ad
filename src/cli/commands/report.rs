use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::models::filter::{DateRange, MachineFilter};
use crate::ui::messages::{header, info};
use crate::ui::render::{
    breakdown_table, comparison_table, matrix_table, period_table, trend_table,
};
use crate::utils::date::parse_range;
use crate::utils::table::Table;

fn range_title(title: &str, range: &DateRange) -> String {
    if range.start() == range.end() {
        format!("{title}: {}", range.start())
    } else {
        format!("{title}: {} → {}", range.start(), range.end())
    }
}

fn print_or_empty(table: Table) {
    if table.is_empty() {
        info("No data for the selected period.");
    } else {
        print!("{}", table.render());
    }
}

/// The period views: breakdown, report, trend, matrix and compare.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (range_arg, machine) = match cmd {
        Commands::Breakdown { range, machine }
        | Commands::Report { range, machine }
        | Commands::Trend { range, machine }
        | Commands::Matrix { range, machine }
        | Commands::Compare { range, machine } => (range, machine),
        _ => return Ok(()),
    };

    // A reversed range fails here, before the database is opened.
    let range = parse_range(range_arg)?;
    let filter = MachineFilter::from_arg(machine.as_deref());
    let pool = super::open_db(cfg)?;
    let ph = cfg.placeholder.as_str();

    match cmd {
        Commands::Breakdown { .. } => {
            let rows = ReportLogic::downtime_breakdown(&pool, &range, &filter)?;
            header(range_title("Downtime by cause", &range));
            print_or_empty(breakdown_table(&rows, ph));
        }
        Commands::Report { .. } => {
            let report = ReportLogic::period_report(&pool, &range, &filter)?;
            header(range_title("Production report", &range));
            print_or_empty(period_table(&report, ph));
        }
        Commands::Trend { .. } => {
            let points = ReportLogic::trend(&pool, &range, &filter)?;
            header(range_title("Completion trend", &range));
            print_or_empty(trend_table(&points, ph));
        }
        Commands::Matrix { .. } => {
            let matrix = ReportLogic::downtime_matrix(&pool, &range, &filter)?;
            header(range_title("Downtime matrix (hours)", &range));
            print_or_empty(matrix_table(&matrix));
        }
        Commands::Compare { .. } => {
            let rows = ReportLogic::shift_comparison(&pool, &range, &filter)?;
            header(range_title("Shift comparison", &range));
            print_or_empty(comparison_table(&rows, ph));
        }
        _ => {}
    }

    Ok(())
}
