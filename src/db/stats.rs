use crate::db::pool::DbPool;
use crate::db::queries::{count_rows, recorded_date_bounds};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// Tables reported by `db --info`, with their display labels.
const COUNTED_TABLES: [(&str, &str); 5] = [
    ("machines", "Machines"),
    ("downtime_causes", "Downtime causes"),
    ("production_records", "Production records"),
    ("downtime_entries", "Downtime entries"),
    ("observations", "Observations"),
];

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    for (table, label) in COUNTED_TABLES {
        let count = count_rows(&pool.conn, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    println!("{}• Date range:{}", CYAN, RESET);
    match recorded_date_bounds(&pool.conn)? {
        Some((first, last)) => {
            println!("    from: {first}");
            println!("    to:   {last}");

            let days = (last - first).num_days() + 1;
            let records = count_rows(&pool.conn, "production_records")?;
            println!(
                "{}• Average records/day:{} {:.2}",
                CYAN,
                RESET,
                records as f64 / days as f64
            );
        }
        None => {
            println!("    from: {GREY}--{RESET}");
            println!("    to:   {GREY}--{RESET}");
        }
    }

    println!();
    Ok(())
}
