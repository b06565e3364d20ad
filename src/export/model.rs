// src/export/model.rs

use crate::core::calculator::completion::format_hours;
use crate::errors::{AppError, AppResult};
use crate::models::report::{CauseBreakdown, PeriodReport, SummaryRow};
use serde::Serialize;

/// A report flattened for writing: string cells for CSV/XLSX and the typed
/// rows serialized for JSON.
pub struct ExportData {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub json: serde_json::Value,
}

fn to_json<T: Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

fn opt_num(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.1}")).unwrap_or_default()
}

impl ExportData {
    pub fn from_history(rows: &[SummaryRow], placeholder: &str) -> AppResult<Self> {
        Ok(Self {
            headers: vec![
                "machine",
                "date",
                "shift",
                "target",
                "actual",
                "completion_pct",
                "downtime",
                "observation",
            ],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.machine.clone(),
                        r.date.to_string(),
                        r.shift.to_db_str().to_string(),
                        r.target.to_string(),
                        r.actual.to_string(),
                        opt_num(r.completion_pct),
                        r.downtime_label(placeholder),
                        r.observation_label(placeholder).to_string(),
                    ]
                })
                .collect(),
            json: to_json(&rows)?,
        })
    }

    /// The Total line is appended when the report has rows.
    pub fn from_period_report(report: &PeriodReport) -> AppResult<Self> {
        let mut rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.machine.clone(),
                    r.date.to_string(),
                    r.target.to_string(),
                    r.actual.to_string(),
                    opt_num(r.completion_pct),
                ]
            })
            .collect();

        if !rows.is_empty() {
            rows.push(vec![
                "Total".to_string(),
                String::new(),
                report.total.target.to_string(),
                report.total.actual.to_string(),
                format!("{:.1}", report.total.completion_pct),
            ]);
        }

        Ok(Self {
            headers: vec!["machine", "date", "target", "actual", "completion_pct"],
            rows,
            json: to_json(report)?,
        })
    }

    pub fn from_breakdown(rows: &[CauseBreakdown]) -> AppResult<Self> {
        Ok(Self {
            headers: vec!["cause", "total_hours", "observations"],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.cause.clone(),
                        format_hours(r.total_hours),
                        r.observations.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
            json: to_json(&rows)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
