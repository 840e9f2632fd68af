use serde::Serialize;
use std::fmt;

/// One of the five daily check-in steps, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    PreviousDay,
    WakeUp,
    Departure,
    Arrival,
    DailyReport,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::PreviousDay,
        Stage::WakeUp,
        Stage::Departure,
        Stage::Arrival,
        Stage::DailyReport,
    ];

    /// Position inside `Stage::ORDER`.
    pub fn index(&self) -> usize {
        match self {
            Stage::PreviousDay => 0,
            Stage::WakeUp => 1,
            Stage::Departure => 2,
            Stage::Arrival => 3,
            Stage::DailyReport => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreviousDay => "previous-day",
            Stage::WakeUp => "wakeup",
            Stage::Departure => "departure",
            Stage::Arrival => "arrival",
            Stage::DailyReport => "daily-report",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::PreviousDay => "Previous-day report",
            Stage::WakeUp => "Wake-up",
            Stage::Departure => "Departure",
            Stage::Arrival => "Arrival",
            Stage::DailyReport => "Daily report",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Stage::ORDER
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// The stage that must be satisfied before this one can be submitted.
    pub fn predecessor(&self) -> Option<Stage> {
        match self {
            Stage::PreviousDay => None,
            other => Some(Stage::ORDER[other.index() - 1]),
        }
    }

    /// Stages persisted as columns of the attendance record.
    pub fn is_attendance_stage(&self) -> bool {
        matches!(self, Stage::WakeUp | Stage::Departure | Stage::Arrival)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
