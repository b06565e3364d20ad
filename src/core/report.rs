//! Read-only aggregation over the production store.
//!
//! Every view is parameterized by a date (or a validated `DateRange`) and a
//! `MachineFilter`. Empty selections yield empty structures, never errors.

use crate::core::calculator::completion::{
    completion_pct, mean_defined, raw_completion, round1, round2, total_completion_pct,
};
use crate::db::pool::DbPool;
use crate::db::queries::{date_to_db, parse_db_date, parse_db_shift};
use crate::errors::{AppError, AppResult};
use crate::models::filter::{DateRange, MachineFilter};
use crate::models::production::{CauseHours, RecordId};
use crate::models::report::{
    CauseBreakdown, DowntimeMatrix, PeriodReport, PeriodRow, PeriodTotal, ShiftComparison,
    SummaryRow, TrendPoint,
};
use crate::models::shift::Shift;
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Filter shared by the per-record views; every parameter may be NULL.
const RECORD_FILTER: &str = "
    (?1 IS NULL OR m.name = ?1)
    AND (?2 IS NULL OR p.shift = ?2)
    AND (?3 IS NULL OR p.date = ?3)
    AND (?4 IS NULL OR p.date >= ?4)
    AND (?5 IS NULL OR p.date <= ?5)";

/// Filter shared by the range views.
const RANGE_FILTER: &str = "
    p.date BETWEEN ?1 AND ?2
    AND (?3 IS NULL OR m.name = ?3)";

pub struct ReportLogic;

/// One record reduced to what the range views need.
struct RangeRecord {
    date: NaiveDate,
    shift: Shift,
    target: i64,
    actual: i64,
    downtime_hours: f64,
}

impl ReportLogic {
    /// Records of one date and shift, one row per machine that has a record.
    pub fn shift_summary(
        pool: &DbPool,
        date: NaiveDate,
        shift: Shift,
        machine: &MachineFilter,
    ) -> AppResult<Vec<SummaryRow>> {
        load_summary_rows(&pool.conn, machine, Some(shift), Some(date), None)
    }

    /// Records matching any combination of machine, shift and date.
    pub fn history(
        pool: &DbPool,
        machine: &MachineFilter,
        shift: Option<Shift>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<SummaryRow>> {
        load_summary_rows(&pool.conn, machine, shift, date, None)
    }

    /// Every record of a period, same row shape as the history.
    pub fn records_in_range(
        pool: &DbPool,
        range: &DateRange,
        machine: &MachineFilter,
    ) -> AppResult<Vec<SummaryRow>> {
        load_summary_rows(&pool.conn, machine, None, None, Some(range))
    }

    /// Total hours per cause, heaviest first.
    pub fn downtime_breakdown(
        pool: &DbPool,
        range: &DateRange,
        machine: &MachineFilter,
    ) -> AppResult<Vec<CauseBreakdown>> {
        let sql = format!(
            "SELECT cause, SUM(hours) AS total, GROUP_CONCAT(comment, ' / ')
             FROM (
                SELECT d.cause AS cause, d.duration_hours AS hours, o.comment AS comment
                FROM downtime_entries d
                JOIN production_records p ON p.id = d.production_id
                JOIN machines m ON m.id = p.machine_id
                LEFT JOIN observations o ON o.production_id = p.id
                WHERE {RANGE_FILTER}
                ORDER BY p.date, m.name, d.id
             )
             GROUP BY cause
             ORDER BY total DESC, cause ASC"
        );

        let mut stmt = pool.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![range.start_str(), range.end_str(), machine.as_sql_param()],
            |row| {
                Ok(CauseBreakdown {
                    cause: row.get(0)?,
                    total_hours: round2(row.get(1)?),
                    observations: row.get(2)?,
                })
            },
        )?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Target/actual summed per (machine, date), plus the Total line.
    pub fn period_report(
        pool: &DbPool,
        range: &DateRange,
        machine: &MachineFilter,
    ) -> AppResult<PeriodReport> {
        let sql = format!(
            "SELECT m.name, p.date, SUM(p.target), SUM(p.actual)
             FROM production_records p
             JOIN machines m ON m.id = p.machine_id
             WHERE {RANGE_FILTER}
             GROUP BY m.name, p.date
             ORDER BY p.date ASC, m.name ASC"
        );

        let mut stmt = pool.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![range.start_str(), range.end_str(), machine.as_sql_param()],
            |row| {
                let date_str: String = row.get(1)?;
                let target: i64 = row.get(2)?;
                let actual: i64 = row.get(3)?;
                Ok(PeriodRow {
                    machine: row.get(0)?,
                    date: parse_db_date(1, &date_str)?,
                    target,
                    actual,
                    completion_pct: completion_pct(target, actual),
                })
            },
        )?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }

        let target = checked_total(out.iter().map(|r| r.target))?;
        let actual = checked_total(out.iter().map(|r| r.actual))?;

        Ok(PeriodReport {
            rows: out,
            total: PeriodTotal {
                target,
                actual,
                completion_pct: total_completion_pct(target, actual),
            },
        })
    }

    /// Mean completion per date; records with a zero target are skipped.
    pub fn trend(
        pool: &DbPool,
        range: &DateRange,
        machine: &MachineFilter,
    ) -> AppResult<Vec<TrendPoint>> {
        let records = load_range_records(&pool.conn, range, machine)?;

        let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
        for r in &records {
            by_date
                .entry(r.date)
                .or_default()
                .push(raw_completion(r.target, r.actual));
        }

        Ok(by_date
            .into_iter()
            .map(|(date, values)| TrendPoint {
                date,
                avg_completion_pct: mean_defined(values).map(round1),
            })
            .collect())
    }

    /// Machine × cause grid; axes only list what has downtime in the range.
    pub fn downtime_matrix(
        pool: &DbPool,
        range: &DateRange,
        machine: &MachineFilter,
    ) -> AppResult<DowntimeMatrix> {
        let sql = format!(
            "SELECT m.name, d.cause, SUM(d.duration_hours)
             FROM downtime_entries d
             JOIN production_records p ON p.id = d.production_id
             JOIN machines m ON m.id = p.machine_id
             WHERE {RANGE_FILTER}
             GROUP BY m.name, d.cause"
        );

        let mut stmt = pool.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![range.start_str(), range.end_str(), machine.as_sql_param()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            },
        )?;

        let mut cells = Vec::new();
        for r in rows {
            cells.push(r?);
        }

        let machines: Vec<String> = cells
            .iter()
            .map(|(m, _, _)| m.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let causes: Vec<String> = cells
            .iter()
            .map(|(_, c, _)| c.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut hours = vec![vec![0.0; causes.len()]; machines.len()];
        for (m, c, h) in cells {
            // both axes were built from `cells`, the lookups cannot miss
            if let (Some(mi), Some(ci)) = (
                machines.iter().position(|x| *x == m),
                causes.iter().position(|x| *x == c),
            ) {
                hours[mi][ci] = round2(h);
            }
        }

        Ok(DowntimeMatrix {
            machines,
            causes,
            hours,
        })
    }

    /// Mean completion and total downtime per shift present in the range.
    pub fn shift_comparison(
        pool: &DbPool,
        range: &DateRange,
        machine: &MachineFilter,
    ) -> AppResult<Vec<ShiftComparison>> {
        let records = load_range_records(&pool.conn, range, machine)?;

        let mut by_shift: BTreeMap<Shift, (Vec<Option<f64>>, f64)> = BTreeMap::new();
        for r in &records {
            let slot = by_shift.entry(r.shift).or_default();
            slot.0.push(raw_completion(r.target, r.actual));
            slot.1 += r.downtime_hours;
        }

        Ok(by_shift
            .into_iter()
            .map(|(shift, (values, hours))| ShiftComparison {
                shift,
                avg_completion_pct: mean_defined(values).map(round1),
                total_downtime_hours: round2(hours),
            })
            .collect())
    }
}

/// Sum of the Total line; an overflow is reported, never wrapped.
fn checked_total<I: Iterator<Item = i64>>(mut values: I) -> AppResult<i64> {
    values.try_fold(0i64, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| AppError::Validation("period total exceeds the supported range".into()))
    })
}

fn load_summary_rows(
    conn: &Connection,
    machine: &MachineFilter,
    shift: Option<Shift>,
    date: Option<NaiveDate>,
    range: Option<&DateRange>,
) -> AppResult<Vec<SummaryRow>> {
    let shift_param = shift.map(|s| s.to_db_str());
    let date_param = date.as_ref().map(date_to_db);
    let start_param = range.map(|r| r.start_str());
    let end_param = range.map(|r| r.end_str());

    let sql = format!(
        "SELECT p.id, m.name, p.date, p.shift, p.target, p.actual, o.comment
         FROM production_records p
         JOIN machines m ON m.id = p.machine_id
         LEFT JOIN observations o ON o.production_id = p.id
         WHERE {RECORD_FILTER}
         ORDER BY p.date ASC, m.name ASC,
                  CASE p.shift WHEN 'morning' THEN 0 WHEN 'afternoon' THEN 1 ELSE 2 END"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            machine.as_sql_param(),
            shift_param,
            date_param,
            start_param,
            end_param
        ],
        |row| {
            let date_str: String = row.get(2)?;
            let shift_str: String = row.get(3)?;
            let target: i64 = row.get(4)?;
            let actual: i64 = row.get(5)?;
            Ok(SummaryRow {
                record_id: row.get(0)?,
                machine: row.get(1)?,
                date: parse_db_date(2, &date_str)?,
                shift: parse_db_shift(3, &shift_str)?,
                target,
                actual,
                completion_pct: completion_pct(target, actual),
                downtime: Vec::new(),
                observation: row.get(6)?,
            })
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    if out.is_empty() {
        return Ok(out);
    }

    // Downtime of the same selection in one pass, in entry order.
    let sql = format!(
        "SELECT d.production_id, d.cause, d.duration_hours
         FROM downtime_entries d
         JOIN production_records p ON p.id = d.production_id
         JOIN machines m ON m.id = p.machine_id
         WHERE {RECORD_FILTER}
         ORDER BY d.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt.query_map(
        params![
            machine.as_sql_param(),
            shift_param,
            date_param,
            start_param,
            end_param
        ],
        |row| {
            Ok((
                row.get::<_, RecordId>(0)?,
                CauseHours {
                    cause: row.get(1)?,
                    hours: row.get(2)?,
                },
            ))
        },
    )?;

    let mut by_record: HashMap<RecordId, Vec<CauseHours>> = HashMap::new();
    for e in entries {
        let (id, ch) = e?;
        by_record.entry(id).or_default().push(ch);
    }

    for row in &mut out {
        if let Some(d) = by_record.remove(&row.record_id) {
            row.downtime = d;
        }
    }

    Ok(out)
}

fn load_range_records(
    conn: &Connection,
    range: &DateRange,
    machine: &MachineFilter,
) -> AppResult<Vec<RangeRecord>> {
    let sql = format!(
        "SELECT p.date, p.shift, p.target, p.actual, COALESCE(d.total, 0.0)
         FROM production_records p
         JOIN machines m ON m.id = p.machine_id
         LEFT JOIN (
            SELECT production_id, SUM(duration_hours) AS total
            FROM downtime_entries
            GROUP BY production_id
         ) d ON d.production_id = p.id
         WHERE {RANGE_FILTER}
         ORDER BY p.date ASC, m.name ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![range.start_str(), range.end_str(), machine.as_sql_param()],
        |row| {
            let date_str: String = row.get(0)?;
            let shift_str: String = row.get(1)?;
            Ok(RangeRecord {
                date: parse_db_date(0, &date_str)?,
                shift: parse_db_shift(1, &shift_str)?,
                target: row.get(2)?,
                actual: row.get(3)?,
                downtime_hours: row.get(4)?,
            })
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
