//! Turn report rows into text tables.

use crate::core::calculator::completion::{format_hours, format_pct};
use crate::models::report::{
    CauseBreakdown, DowntimeMatrix, PeriodReport, ShiftComparison, SummaryRow, TrendPoint,
};
use crate::utils::table::{Column, Table};

pub fn summary_table(rows: &[SummaryRow], placeholder: &str, with_date: bool) -> Table {
    let mut columns = vec![Column::left("Machine")];
    if with_date {
        columns.push(Column::left("Date"));
        columns.push(Column::left("Shift"));
    }
    columns.extend([
        Column::right("Target"),
        Column::right("Actual"),
        Column::right("% Done"),
        Column::left("Downtime"),
        Column::left("Observation"),
    ]);

    let mut table = Table::new(columns);
    for r in rows {
        let mut cells = vec![r.machine.clone()];
        if with_date {
            cells.push(r.date.to_string());
            cells.push(r.shift.label().to_string());
        }
        cells.extend([
            r.target.to_string(),
            r.actual.to_string(),
            format_pct(r.completion_pct, placeholder),
            r.downtime_label(placeholder),
            r.observation_label(placeholder).to_string(),
        ]);
        table.add_row(cells);
    }
    table
}

pub fn breakdown_table(rows: &[CauseBreakdown], placeholder: &str) -> Table {
    let mut table = Table::new(vec![
        Column::left("Cause"),
        Column::right("Hours"),
        Column::left("Observations"),
    ]);
    for r in rows {
        table.add_row(vec![
            r.cause.clone(),
            format_hours(r.total_hours),
            r.observations.clone().unwrap_or_else(|| placeholder.to_string()),
        ]);
    }
    table
}

/// Rows followed by the Total line; an empty report stays empty.
pub fn period_table(report: &PeriodReport, placeholder: &str) -> Table {
    let mut table = Table::new(vec![
        Column::left("Machine"),
        Column::left("Date"),
        Column::right("Target"),
        Column::right("Actual"),
        Column::right("% Done"),
    ]);
    for r in &report.rows {
        table.add_row(vec![
            r.machine.clone(),
            r.date.to_string(),
            r.target.to_string(),
            r.actual.to_string(),
            format_pct(r.completion_pct, placeholder),
        ]);
    }
    if !report.rows.is_empty() {
        table.add_row(vec![
            "Total".to_string(),
            placeholder.to_string(),
            report.total.target.to_string(),
            report.total.actual.to_string(),
            format_pct(Some(report.total.completion_pct), placeholder),
        ]);
    }
    table
}

pub fn trend_table(points: &[TrendPoint], placeholder: &str) -> Table {
    let mut table = Table::new(vec![Column::left("Date"), Column::right("Avg % Done")]);
    for p in points {
        table.add_row(vec![
            p.date.to_string(),
            format_pct(p.avg_completion_pct, placeholder),
        ]);
    }
    table
}

pub fn matrix_table(matrix: &DowntimeMatrix) -> Table {
    let mut columns = vec![Column::left("Machine")];
    columns.extend(matrix.causes.iter().map(|c| Column::right(c)));

    let mut table = Table::new(columns);
    for (machine, hours) in matrix.machines.iter().zip(&matrix.hours) {
        let mut cells = vec![machine.clone()];
        cells.extend(hours.iter().map(|h| format_hours(*h)));
        table.add_row(cells);
    }
    table
}

pub fn comparison_table(rows: &[ShiftComparison], placeholder: &str) -> Table {
    let mut table = Table::new(vec![
        Column::left("Shift"),
        Column::right("Avg % Done"),
        Column::right("Downtime h"),
    ]);
    for r in rows {
        table.add_row(vec![
            r.shift.label().to_string(),
            format_pct(r.avg_completion_pct, placeholder),
            format_hours(r.total_downtime_hours),
        ]);
    }
    table
}
