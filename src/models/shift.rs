use serde::Serialize;
use std::fmt;

/// One of the three fixed daily work periods.
///
/// The derived ordering (morning < afternoon < night) is the order used by
/// every report that sorts or groups by shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Night => "night",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Shift::Morning),
            "afternoon" => Some(Shift::Afternoon),
            "night" => Some(Shift::Night),
            _ => None,
        }
    }

    /// Helper: parse user input. Accepts the DB codes, their initials and
    /// the labels used by the old spreadsheet-era databases.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "morning" | "m" | "matin" => Some(Shift::Morning),
            "afternoon" | "a" | "après-midi" | "apres-midi" => Some(Shift::Afternoon),
            "night" | "n" | "nuit" => Some(Shift::Night),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
