mod common;
use common::{day, open_seeded, record};
use rshiftlog::core::machine::MachineLogic;
use rshiftlog::core::report::ReportLogic;
use rshiftlog::errors::AppError;
use rshiftlog::models::filter::{DateRange, MachineFilter};
use rshiftlog::models::report::NO_VALUE;
use rshiftlog::models::shift::Shift;
use rshiftlog::utils::date::parse_range;

fn range(s: &str) -> DateRange {
    parse_range(s).expect("valid range")
}

#[test]
fn test_shift_summary_scenario() {
    let mut pool = open_seeded("report_summary_scenario", &["M1", "M2"]);

    record(
        &mut pool,
        "M1",
        "2024-01-01",
        Shift::Morning,
        100,
        80,
        &[("Panne", 2.0)],
        "ok",
    );

    let rows =
        ReportLogic::shift_summary(&pool, day("2024-01-01"), Shift::Morning, &MachineFilter::All)
            .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.machine, "M1");
    assert_eq!(row.target, 100);
    assert_eq!(row.actual, 80);
    assert_eq!(row.completion_pct, Some(80.0));
    assert!(row.downtime_label(NO_VALUE).contains("Panne: 2.0h"));
    assert_eq!(row.observation_label(NO_VALUE), "ok");
    assert_eq!(row.total_downtime_hours(), 2.0);

    // same key, no downtime: the entry disappears and the placeholder shows
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 100, 80, &[], "ok");
    let rows =
        ReportLogic::shift_summary(&pool, day("2024-01-01"), Shift::Morning, &MachineFilter::All)
            .unwrap();
    assert_eq!(rows[0].downtime_label(NO_VALUE), NO_VALUE);
}

#[test]
fn test_shift_summary_filters_by_machine_and_shift() {
    let mut pool = open_seeded("report_summary_filter", &["M1", "M2"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 10, 10, &[], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Morning, 10, 5, &[], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Night, 10, 7, &[], "");

    let rows = ReportLogic::shift_summary(
        &pool,
        day("2024-01-01"),
        Shift::Morning,
        &MachineFilter::from_arg(Some("M2")),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].actual, 5);

    let rows =
        ReportLogic::shift_summary(&pool, day("2024-01-02"), Shift::Morning, &MachineFilter::All)
            .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_zero_target_has_no_completion() {
    let mut pool = open_seeded("report_zero_target", &["M1"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 0, 12, &[], "");

    let rows = ReportLogic::history(&pool, &MachineFilter::All, None, None).unwrap();
    assert_eq!(rows[0].completion_pct, None);

    let report = ReportLogic::period_report(&pool, &range("2024-01"), &MachineFilter::All).unwrap();
    assert_eq!(report.rows[0].completion_pct, None);
    assert_eq!(report.total.completion_pct, 0.0);

    let trend = ReportLogic::trend(&pool, &range("2024-01"), &MachineFilter::All).unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].avg_completion_pct, None);
}

#[test]
fn test_history_orders_and_filters() {
    let mut pool = open_seeded("report_history", &["M1", "M2"]);
    record(&mut pool, "M2", "2024-01-02", Shift::Morning, 10, 10, &[], "");
    record(&mut pool, "M1", "2024-01-01", Shift::Night, 10, 10, &[], "");
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 10, 10, &[], "");

    let rows = ReportLogic::history(&pool, &MachineFilter::All, None, None).unwrap();
    let keys: Vec<_> = rows
        .iter()
        .map(|r| (r.date.to_string(), r.machine.clone(), r.shift))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2024-01-01".to_string(), "M1".to_string(), Shift::Morning),
            ("2024-01-01".to_string(), "M1".to_string(), Shift::Night),
            ("2024-01-02".to_string(), "M2".to_string(), Shift::Morning),
        ]
    );

    let night = ReportLogic::history(&pool, &MachineFilter::All, Some(Shift::Night), None).unwrap();
    assert_eq!(night.len(), 1);

    let m2 = ReportLogic::history(
        &pool,
        &MachineFilter::Named("M2".into()),
        None,
        Some(day("2024-01-02")),
    )
    .unwrap();
    assert_eq!(m2.len(), 1);
}

#[test]
fn test_period_report_total_row() {
    let mut pool = open_seeded("report_period_total", &["M1", "M2"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 100, 80, &[], "");
    record(&mut pool, "M1", "2024-01-01", Shift::Afternoon, 100, 90, &[], "");
    record(&mut pool, "M2", "2024-01-02", Shift::Morning, 50, 20, &[], "");

    let report = ReportLogic::period_report(&pool, &range("2024-01"), &MachineFilter::All).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].machine, "M1");
    assert_eq!(report.rows[0].target, 200);
    assert_eq!(report.rows[0].actual, 170);
    assert_eq!(report.rows[0].completion_pct, Some(85.0));

    // 190 / 250
    assert_eq!(report.total.target, 250);
    assert_eq!(report.total.actual, 190);
    assert_eq!(report.total.completion_pct, 76.0);
}

#[test]
fn test_period_report_rounds_to_one_decimal() {
    let mut pool = open_seeded("report_period_rounding", &["M1"]);
    record(&mut pool, "M1", "2024-03-05", Shift::Morning, 3, 2, &[], "");

    let report =
        ReportLogic::period_report(&pool, &range("2024-03-05"), &MachineFilter::All).unwrap();
    assert_eq!(report.rows[0].completion_pct, Some(66.7));
    assert_eq!(report.total.completion_pct, 66.7);
}

#[test]
fn test_breakdown_sums_hours_per_cause() {
    let mut pool = open_seeded("report_breakdown", &["M1", "M2"]);
    record(
        &mut pool,
        "M1",
        "2024-01-01",
        Shift::Morning,
        10,
        5,
        &[("Panne", 2.0), ("MO", 0.5)],
        "motor",
    );
    record(&mut pool, "M2", "2024-01-03", Shift::Night, 10, 5, &[("Panne", 1.5)], "");
    record(&mut pool, "M2", "2024-02-01", Shift::Night, 10, 5, &[("Panne", 9.0)], "");

    let rows =
        ReportLogic::downtime_breakdown(&pool, &range("2024-01"), &MachineFilter::All).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cause, "Panne");
    assert_eq!(rows[0].total_hours, 3.5);
    assert_eq!(rows[0].observations.as_deref(), Some("motor"));
    assert_eq!(rows[1].cause, "MO");
    assert_eq!(rows[1].total_hours, 0.5);

    let m2 = ReportLogic::downtime_breakdown(&pool, &range("2024-01"), &MachineFilter::Named("M2".into()))
        .unwrap();
    assert_eq!(m2.len(), 1);
    assert_eq!(m2[0].total_hours, 1.5);
}

#[test]
fn test_breakdown_of_empty_range_is_empty() {
    let mut pool = open_seeded("report_breakdown_empty", &["M1"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 10, 5, &[("Panne", 2.0)], "");

    let rows =
        ReportLogic::downtime_breakdown(&pool, &range("2023"), &MachineFilter::All).unwrap();
    assert!(rows.is_empty());

    let report = ReportLogic::period_report(&pool, &range("2023"), &MachineFilter::All).unwrap();
    assert!(report.rows.is_empty());
}

#[test]
fn test_reversed_range_is_rejected() {
    let err = parse_range("2024-02-01:2024-01-01").unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
    assert!(DateRange::new(day("2024-02-01"), day("2024-01-01")).is_err());
    assert!(parse_range("2024-01:2024-01-15").is_err());
}

#[test]
fn test_trend_averages_per_day() {
    let mut pool = open_seeded("report_trend", &["M1", "M2"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 100, 80, &[], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Morning, 100, 100, &[], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Night, 0, 30, &[], "");
    record(&mut pool, "M1", "2024-01-02", Shift::Morning, 3, 1, &[], "");

    let points = ReportLogic::trend(&pool, &range("2024-01"), &MachineFilter::All).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].date, day("2024-01-01"));
    assert_eq!(points[0].avg_completion_pct, Some(90.0));
    assert_eq!(points[1].avg_completion_pct, Some(33.3));
}

#[test]
fn test_downtime_matrix_axes_and_cells() {
    let mut pool = open_seeded("report_matrix", &["M1", "M2", "M3"]);
    record(
        &mut pool,
        "M2",
        "2024-01-01",
        Shift::Morning,
        10,
        5,
        &[("Panne", 1.0), ("MO", 0.25)],
        "",
    );
    record(&mut pool, "M1", "2024-01-02", Shift::Morning, 10, 5, &[("Panne", 2.0)], "");
    record(&mut pool, "M1", "2024-01-03", Shift::Night, 10, 5, &[("Panne", 0.5)], "");
    record(&mut pool, "M3", "2024-01-03", Shift::Night, 10, 10, &[], "");

    let matrix = ReportLogic::downtime_matrix(&pool, &range("2024-01"), &MachineFilter::All).unwrap();
    assert_eq!(matrix.machines, vec!["M1", "M2"]);
    assert_eq!(matrix.causes, vec!["MO", "Panne"]);
    assert_eq!(matrix.get("M1", "Panne"), 2.5);
    assert_eq!(matrix.get("M1", "MO"), 0.0);
    assert_eq!(matrix.get("M2", "MO"), 0.25);
    assert_eq!(matrix.get("M3", "Panne"), 0.0);

    let empty = ReportLogic::downtime_matrix(&pool, &range("2023"), &MachineFilter::All).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_shift_comparison_lists_recorded_shifts_only() {
    let mut pool = open_seeded("report_compare", &["M1", "M2"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Night, 100, 50, &[("Panne", 1.0)], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Night, 100, 100, &[("MO", 0.5)], "");
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 100, 90, &[], "");

    let rows = ReportLogic::shift_comparison(&pool, &range("2024"), &MachineFilter::All).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].shift, Shift::Morning);
    assert_eq!(rows[0].avg_completion_pct, Some(90.0));
    assert_eq!(rows[0].total_downtime_hours, 0.0);
    assert_eq!(rows[1].shift, Shift::Night);
    assert_eq!(rows[1].avg_completion_pct, Some(75.0));
    assert_eq!(rows[1].total_downtime_hours, 1.5);
}

#[test]
fn test_period_total_overflow_is_an_error() {
    let pool = open_seeded("report_period_overflow", &["M1", "M2"]);

    // Bypass the recording cap to reach the summing code.
    for (name, target) in [("M1", i64::MAX), ("M2", 1)] {
        let m = MachineLogic::resolve(&pool, name).unwrap();
        pool.conn
            .execute(
                "INSERT INTO production_records (machine_id, date, shift, target, actual)
                 VALUES (?1, '2024-01-01', 'morning', ?2, 0)",
                rusqlite::params![m.id, target],
            )
            .unwrap();
    }

    let err = ReportLogic::period_report(&pool, &range("2024-01"), &MachineFilter::All).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_only_lowercase_all_selects_every_machine() {
    assert_eq!(MachineFilter::from_arg(None), MachineFilter::All);
    assert_eq!(MachineFilter::from_arg(Some("all")), MachineFilter::All);
    assert_eq!(
        MachineFilter::from_arg(Some("All")),
        MachineFilter::Named("All".into())
    );

    let mut pool = open_seeded("report_machine_named_all", &["ALL", "M2"]);
    record(&mut pool, "ALL", "2024-01-01", Shift::Morning, 10, 5, &[], "");
    record(&mut pool, "M2", "2024-01-01", Shift::Morning, 10, 10, &[], "");

    let report = ReportLogic::period_report(
        &pool,
        &range("2024-01"),
        &MachineFilter::from_arg(Some("ALL")),
    )
    .unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].machine, "ALL");
    assert_eq!(report.total.target, 10);
}

#[test]
fn test_malformed_periods_are_rejected() {
    for bad in ["2024x01", "2024-13", "+202", "+2024-1", "2024-1x", "24-01-01", "+202-01-01"] {
        assert!(parse_range(bad).is_err(), "{bad} should be rejected");
    }
    assert!(parse_range("2024-02").is_ok());
    assert!(parse_range("2024-02:2024-03").is_ok());
}
