use super::machine::MachineId;
use super::shift::Shift;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

pub type RecordId = i64;

/// One row of `production_records`, keyed by (machine, date, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionRecord {
    pub id: RecordId,
    pub machine_id: MachineId,
    pub date: NaiveDate,
    pub shift: Shift,
    pub target: i64,
    pub actual: i64,
}

/// A persisted downtime line: hours lost to one cause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CauseHours {
    pub cause: String,
    pub hours: f64,
}

/// Input of a single shift save.
///
/// `downtime` carries every cause the operator filled in, zero included;
/// only positive durations end up in the store.
#[derive(Debug, Clone)]
pub struct ShiftEntry {
    pub machine_id: MachineId,
    pub date: NaiveDate,
    pub shift: Shift,
    pub target: i64,
    pub actual: i64,
    pub downtime: BTreeMap<String, f64>,
    pub observation: String,
}

impl ShiftEntry {
    pub fn new(machine_id: MachineId, date: NaiveDate, shift: Shift, target: i64, actual: i64) -> Self {
        Self {
            machine_id,
            date,
            shift,
            target,
            actual,
            downtime: BTreeMap::new(),
            observation: String::new(),
        }
    }

    pub fn with_downtime(mut self, cause: &str, hours: f64) -> Self {
        self.downtime.insert(cause.to_string(), hours);
        self
    }

    pub fn with_observation(mut self, text: &str) -> Self {
        self.observation = text.to_string();
        self
    }
}
