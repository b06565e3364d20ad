//! Row shapes produced by the aggregation engine.

use super::production::{CauseHours, RecordId};
use super::shift::Shift;
use crate::core::calculator::completion::format_hours;
use chrono::NaiveDate;
use serde::Serialize;

/// Placeholder shown for an empty downtime list or a missing observation.
pub const NO_VALUE: &str = "-";

/// One production record with its downtime and observation, as shown by the
/// shift summary and the history views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub record_id: RecordId,
    pub machine: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub target: i64,
    pub actual: i64,
    pub completion_pct: Option<f64>,
    pub downtime: Vec<CauseHours>,
    pub observation: Option<String>,
}

impl SummaryRow {
    /// `"Panne: 2.0h / MO: 0.5h"`, or the placeholder when nothing stopped.
    pub fn downtime_label(&self, placeholder: &str) -> String {
        if self.downtime.is_empty() {
            return placeholder.to_string();
        }
        self.downtime
            .iter()
            .map(|d| format!("{}: {}h", d.cause, format_hours(d.hours)))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn observation_label<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.observation.as_deref().unwrap_or(placeholder)
    }

    pub fn total_downtime_hours(&self) -> f64 {
        self.downtime.iter().map(|d| d.hours).sum()
    }
}

/// Downtime hours lost to one cause over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CauseBreakdown {
    pub cause: String,
    pub total_hours: f64,
    pub observations: Option<String>,
}

/// Summed production of one machine on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    pub machine: String,
    pub date: NaiveDate,
    pub target: i64,
    pub actual: i64,
    pub completion_pct: Option<f64>,
}

/// The synthetic "Total" line of a period report. Its completion is 0
/// rather than null when nothing was planned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub target: i64,
    pub actual: i64,
    pub completion_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub rows: Vec<PeriodRow>,
    pub total: PeriodTotal,
}

impl PeriodReport {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: PeriodTotal {
                target: 0,
                actual: 0,
                completion_pct: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_completion_pct: Option<f64>,
}

/// Machine × cause grid of downtime hours. `hours[m][c]` is the total for
/// `machines[m]` and `causes[c]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DowntimeMatrix {
    pub machines: Vec<String>,
    pub causes: Vec<String>,
    pub hours: Vec<Vec<f64>>,
}

impl DowntimeMatrix {
    /// Hours for a (machine, cause) pair; 0 for combinations never recorded.
    pub fn get(&self, machine: &str, cause: &str) -> f64 {
        let m = self.machines.iter().position(|x| x == machine);
        let c = self.causes.iter().position(|x| x == cause);
        match (m, c) {
            (Some(m), Some(c)) => self.hours[m][c],
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftComparison {
    pub shift: Shift,
    pub avg_completion_pct: Option<f64>,
    pub total_downtime_hours: f64,
}
