#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rshiftlog::config::Config;
use rshiftlog::core::cause::CauseLogic;
use rshiftlog::core::machine::MachineLogic;
use rshiftlog::core::record::RecordLogic;
use rshiftlog::db::initialize::init_db;
use rshiftlog::db::pool::DbPool;
use rshiftlog::models::production::{RecordId, ShiftEntry};
use rshiftlog::models::shift::Shift;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsl() -> Command {
    cargo_bin_cmd!("rshiftlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rshiftlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Fresh database seeded with the given machines and the default causes.
pub fn open_seeded(name: &str, machines: &[&str]) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    let cfg = Config {
        database: db_path,
        default_machines: machines.iter().map(|m| m.to_string()).collect(),
        ..Config::default()
    };
    init_db(&pool.conn, &cfg).expect("init db");
    pool
}

/// Save a shift through the library, resolving the machine by name.
pub fn record(
    pool: &mut DbPool,
    machine: &str,
    date: &str,
    shift: Shift,
    target: i64,
    actual: i64,
    downtime: &[(&str, f64)],
    obs: &str,
) -> RecordId {
    let m = MachineLogic::resolve(pool, machine).expect("machine exists");
    let catalog = CauseLogic::load_catalog(pool).expect("catalog");

    let mut entry = ShiftEntry::new(m.id, day(date), shift, target, actual).with_observation(obs);
    for (cause, hours) in downtime {
        entry = entry.with_downtime(cause, *hours);
    }

    RecordLogic::record_shift(pool, &catalog, &entry).expect("record shift")
}

/// Initialize DB through the CLI and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    rsl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rsl()
        .args([
            "--db",
            db_path,
            "record",
            "2025-09-01",
            "--machine",
            "CTL 1250",
            "--shift",
            "morning",
            "--target",
            "100",
            "--actual",
            "80",
            "--downtime",
            "Panne=2",
            "--obs",
            "bearing replaced",
        ])
        .assert()
        .success();

    rsl()
        .args([
            "--db",
            db_path,
            "record",
            "2025-09-15",
            "--machine",
            "PBM 120",
            "--shift",
            "night",
            "--target",
            "50",
            "--actual",
            "50",
        ])
        .assert()
        .success();
}
