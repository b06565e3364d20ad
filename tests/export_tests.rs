mod common;
use common::{init_db_with_data, open_seeded, record, rsl, setup_test_db, temp_out};
use predicates::str::contains;
use rshiftlog::export::logic::ExportRequest;
use rshiftlog::export::{ExportFormat, ExportLogic, ExportView};
use rshiftlog::models::filter::MachineFilter;
use rshiftlog::models::report::NO_VALUE;
use rshiftlog::models::shift::Shift;
use rshiftlog::utils::date::parse_range;
use std::fs;

#[test]
fn test_export_history_csv_all() {
    let db_path = setup_test_db("export_history_csv_all");
    init_db_with_data(&db_path);

    let out = temp_out("export_history_csv_all", "csv");

    rsl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("machine,date,shift,target,actual,completion_pct,downtime,observation")
    );
    assert!(content.contains("CTL 1250,2025-09-01,morning,100,80,80.0,Panne: 2.0h,bearing replaced"));
    assert!(content.contains("PBM 120,2025-09-15,night,50,50,100.0,-,-"));
}

#[test]
fn test_export_report_json_range() {
    let db_path = setup_test_db("export_report_json_range");
    init_db_with_data(&db_path);

    let out = temp_out("export_report_json_range", "json");

    rsl()
        .args([
            "--db", &db_path, "export", "--view", "report", "--format", "json", "--file", &out,
            "--range", "2025-09-01:2025-09-10",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(json["rows"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(json["rows"][0]["machine"], "CTL 1250");
    assert_eq!(json["total"]["target"], 100);
    assert_eq!(json["total"]["completion_pct"], 80.0);
}

#[test]
fn test_export_breakdown_xlsx() {
    let db_path = setup_test_db("export_breakdown_xlsx");
    init_db_with_data(&db_path);

    let out = temp_out("export_breakdown_xlsx", "xlsx");

    rsl()
        .args([
            "--db", &db_path, "export", "--view", "breakdown", "--format", "xlsx", "--file", &out,
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read exported xlsx");
    // xlsx files are zip archives
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    rsl()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);

    let out = temp_out("export_force", "csv");
    fs::write(&out, "stale").unwrap();

    // no stdin: the overwrite prompt reads EOF and refuses
    rsl()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "stale");

    rsl()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("machine,"));
}

#[test]
fn test_export_data_of_empty_store() {
    let pool = open_seeded("export_empty_store", &["M1"]);

    for view in [ExportView::History, ExportView::Report, ExportView::Breakdown] {
        let data = ExportLogic::build(&pool, view, None, &MachineFilter::All, NO_VALUE).unwrap();
        assert!(data.is_empty());
        assert!(!data.headers.is_empty());
    }
}

#[test]
fn test_export_report_appends_total() {
    let mut pool = open_seeded("export_report_total", &["M1", "M2"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 10, 5, &[], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Morning, 10, 10, &[], "");

    let data = ExportLogic::build(
        &pool,
        ExportView::Report,
        Some(parse_range("2024-01").unwrap()),
        &MachineFilter::All,
        NO_VALUE,
    )
    .unwrap();

    assert_eq!(data.rows.len(), 3);
    let total = data.rows.last().unwrap();
    assert_eq!(total[0], "Total");
    assert_eq!(total[2], "20");
    assert_eq!(total[4], "75.0");
}

#[test]
fn test_export_writes_one_log_entry() {
    let mut pool = open_seeded("export_log_entry", &["M1"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 10, 5, &[], "");
    let out = temp_out("export_log_entry", "csv");

    let req = ExportRequest {
        view: ExportView::History,
        format: ExportFormat::Csv,
        file: &out,
        range: Some("all"),
        machine: MachineFilter::All,
        force: true,
        placeholder: NO_VALUE,
    };
    ExportLogic::export(&mut pool, &req).unwrap();
    assert!(fs::read_to_string(&out).unwrap().starts_with("machine,"));

    let logged: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'export' AND target = ?1",
            [&out],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(logged, 1);
}
