use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Machine selector shared by every report: everything, or one machine by
/// exact name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MachineFilter {
    #[default]
    All,
    Named(String),
}

impl MachineFilter {
    /// `None` and the exact lowercase "all" sentinel select every machine;
    /// any other spelling is a machine name.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.map(str::trim) {
            None | Some("") | Some("all") => MachineFilter::All,
            Some(s) => MachineFilter::Named(s.to_string()),
        }
    }

    /// Value bound to the `(?N IS NULL OR m.name = ?N)` clause of the queries.
    pub fn as_sql_param(&self) -> Option<&str> {
        match self {
            MachineFilter::All => None,
            MachineFilter::Named(n) => Some(n.as_str()),
        }
    }
}

/// Inclusive calendar range. Construction rejects start > end, so a
/// `DateRange` reaching a query is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
