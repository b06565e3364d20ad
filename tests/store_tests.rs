mod common;
use common::{day, open_seeded, record, setup_test_db};
use rshiftlog::config::Config;
use rshiftlog::core::cause::CauseLogic;
use rshiftlog::core::del::DeleteLogic;
use rshiftlog::core::machine::MachineLogic;
use rshiftlog::db::initialize::{init_db, seed_defaults};
use rshiftlog::db::pool::DbPool;
use rshiftlog::db::queries::{count_rows, load_causes, load_record};
use rshiftlog::errors::AppError;
use rshiftlog::core::report::ReportLogic;
use rshiftlog::models::filter::MachineFilter;
use rshiftlog::models::shift::Shift;

#[test]
fn test_duplicate_machine_leaves_table_unchanged() {
    let mut pool = open_seeded("store_duplicate_machine", &["CTL 1250", "CTL 1600"]);
    let before = count_rows(&pool.conn, "machines").unwrap();

    let err = MachineLogic::add(&mut pool, "CTL 1250").unwrap_err();
    assert!(matches!(err, AppError::DuplicateName(ref n) if n == "CTL 1250"));
    assert_eq!(count_rows(&pool.conn, "machines").unwrap(), before);

    // trimmed before comparison
    assert!(MachineLogic::add(&mut pool, "  CTL 1600 ").is_err());
    assert!(MachineLogic::add(&mut pool, "   ").is_err());

    MachineLogic::add(&mut pool, "Press 7").unwrap();
    assert_eq!(count_rows(&pool.conn, "machines").unwrap(), before + 1);
}

#[test]
fn test_machines_are_listed_by_name() {
    let mut pool = open_seeded("store_machine_list", &["Zeta", "Alpha"]);
    MachineLogic::add(&mut pool, "Mu").unwrap();

    let names: Vec<String> = MachineLogic::list(&pool)
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
}

#[test]
fn test_initialization_is_idempotent() {
    let db_path = setup_test_db("store_init_idempotent");
    let pool = DbPool::new(&db_path).unwrap();
    let cfg = Config {
        database: db_path.clone(),
        ..Config::default()
    };

    init_db(&pool.conn, &cfg).unwrap();
    let machines = count_rows(&pool.conn, "machines").unwrap();
    let causes = count_rows(&pool.conn, "downtime_causes").unwrap();
    assert_eq!(machines, 4);
    assert_eq!(causes, 6);

    init_db(&pool.conn, &cfg).unwrap();
    assert_eq!(
        seed_defaults(&pool.conn, &cfg.default_machines, &cfg.default_causes).unwrap(),
        (0, 0)
    );
    assert_eq!(count_rows(&pool.conn, "machines").unwrap(), machines);
    assert_eq!(count_rows(&pool.conn, "downtime_causes").unwrap(), causes);
}

#[test]
fn test_added_cause_is_persisted() {
    let db_path = setup_test_db("store_cause_persist");
    {
        let mut pool = DbPool::new(&db_path).unwrap();
        init_db(&pool.conn, &Config::default()).unwrap();

        let mut catalog = CauseLogic::load_catalog(&pool).unwrap();
        assert!(!catalog.contains("Coupure électrique"));

        CauseLogic::add(&mut pool, &mut catalog, "  Coupure électrique ").unwrap();
        assert!(catalog.contains("Coupure électrique"));

        // known cause: silent success, no duplicate
        let len = catalog.len();
        CauseLogic::add(&mut pool, &mut catalog, "Panne").unwrap();
        assert_eq!(catalog.len(), len);
    }

    let pool = DbPool::new(&db_path).unwrap();
    let reloaded = CauseLogic::load_catalog(&pool).unwrap();
    assert!(reloaded.contains("Coupure électrique"));
    assert_eq!(load_causes(&pool.conn).unwrap().first().map(String::as_str), Some("Panne"));
}

#[test]
fn test_delete_cascades_to_children() {
    let mut pool = open_seeded("store_cascade_delete", &["M1"]);
    let id = record(
        &mut pool,
        "M1",
        "2024-01-01",
        Shift::Morning,
        100,
        80,
        &[("Panne", 2.0), ("MO", 1.0)],
        "ok",
    );
    let keep = record(&mut pool, "M1", "2024-01-01", Shift::Night, 10, 10, &[("MO", 1.0)], "x");

    DeleteLogic::apply(&mut pool, id).unwrap();

    assert!(load_record(&pool.conn, id).unwrap().is_none());
    assert!(load_record(&pool.conn, keep).unwrap().is_some());
    assert_eq!(count_rows(&pool.conn, "downtime_entries").unwrap(), 1);
    assert_eq!(count_rows(&pool.conn, "observations").unwrap(), 1);

    assert!(matches!(
        DeleteLogic::apply(&mut pool, id),
        Err(AppError::RecordNotFound(_))
    ));
}

#[test]
fn test_delete_by_natural_key() {
    let mut pool = open_seeded("store_delete_by_key", &["M1"]);
    let id = record(&mut pool, "M1", "2024-01-01", Shift::Afternoon, 5, 5, &[], "");

    assert!(DeleteLogic::apply_by_key(&mut pool, "M1", day("2024-01-01"), Shift::Night).is_err());
    assert!(matches!(
        DeleteLogic::apply_by_key(&mut pool, "Nope", day("2024-01-01"), Shift::Afternoon),
        Err(AppError::MachineNotFound(_))
    ));

    let removed =
        DeleteLogic::apply_by_key(&mut pool, "M1", day("2024-01-01"), Shift::Afternoon).unwrap();
    assert_eq!(removed, id);
    assert_eq!(count_rows(&pool.conn, "production_records").unwrap(), 0);
}

#[test]
fn test_writes_are_logged() {
    let mut pool = open_seeded("store_audit_log", &["M1"]);
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 1, 1, &[], "");
    record(&mut pool, "M1", "2024-01-01", Shift::Morning, 2, 2, &[], "");

    let ops: Vec<String> = {
        let mut stmt = pool
            .conn
            .prepare("SELECT operation FROM log WHERE operation IN ('record', 'update') ORDER BY id")
            .unwrap();
        stmt.query_map([], |r| r.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    };
    assert_eq!(ops, vec!["record", "update"]);
}

#[test]
fn test_legacy_layout_is_imported() {
    let db_path = setup_test_db("store_legacy_import");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE machines (id INTEGER PRIMARY KEY AUTOINCREMENT, nom TEXT UNIQUE);
            CREATE TABLE production (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                machine_id INTEGER, date TEXT, shift TEXT, objectif INTEGER, realise INTEGER
            );
            CREATE TABLE arrets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                production_id INTEGER, type TEXT, duree REAL
            );
            CREATE TABLE observations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                production_id INTEGER, commentaire TEXT
            );
            INSERT INTO machines (id, nom) VALUES (1, 'CTL 12'), (2, 'Presse');
            INSERT INTO production VALUES (1, 1, '2024-05-02', 'matin', 100, 60);
            INSERT INTO production VALUES (2, 1, '2024-05-02', 'matin', 100, 70);
            INSERT INTO production VALUES (3, 2, '2024-05-02', 'après-midi', 0, 5);
            INSERT INTO production VALUES (4, 2, '2024-05-03', 'nuit', 40, 40);
            INSERT INTO arrets VALUES (1, 1, 'Panne', 3.0);
            INSERT INTO arrets VALUES (2, 2, 'Panne', 1.0);
            INSERT INTO arrets VALUES (3, 2, 'Bourrage', 0.5);
            INSERT INTO arrets VALUES (4, 4, 'MO', 0.0);
            INSERT INTO observations VALUES (1, 2, ' rouleau usé ');
            INSERT INTO observations VALUES (2, 3, '   ');
            "#,
        )
        .unwrap();
    }

    let pool = DbPool::new(&db_path).unwrap();
    init_db(&pool.conn, &Config::default()).unwrap();

    // duplicate key collapsed onto the highest id
    assert_eq!(count_rows(&pool.conn, "production_records").unwrap(), 3);

    let rows = ReportLogic::history(&pool, &MachineFilter::All, None, None).unwrap();
    let ctl = rows.iter().find(|r| r.machine == "CTL 12").unwrap();
    assert_eq!(ctl.shift, Shift::Morning);
    assert_eq!(ctl.actual, 70);
    assert_eq!(ctl.downtime.len(), 2);
    assert_eq!(ctl.observation.as_deref(), Some("rouleau usé"));

    let presse: Vec<_> = rows.iter().filter(|r| r.machine == "Presse").collect();
    assert_eq!(presse[0].shift, Shift::Afternoon);
    assert_eq!(presse[0].observation, None);
    assert_eq!(presse[1].shift, Shift::Night);
    assert!(presse[1].downtime.is_empty());

    // legacy-only cause joined the catalog
    let catalog = CauseLogic::load_catalog(&pool).unwrap();
    assert!(catalog.contains("Bourrage"));

    // a safety zip was written next to the database
    let dir = std::path::Path::new(&db_path).parent().unwrap().to_path_buf();
    let zipped = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| {
            e.file_name()
                .to_string_lossy()
                .ends_with("backup_db_pre_legacy_import.zip")
        });
    assert!(zipped);
}
