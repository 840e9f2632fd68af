use super::stage::Stage;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Persisted attendance facts for one staff member on one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
    pub previous_day_reported: bool,
    /// Target date of the previous-day report; meaningless when
    /// `previous_day_reported` is false.
    pub report_date: Option<NaiveDate>,
    pub wake_up_reported: bool,
    pub departure_reported: bool,
    pub arrival_reported: bool,
    pub daily_report_submitted: bool,
    pub day_completed: bool,
}

impl WorkflowState {
    pub fn is_reported(&self, stage: Stage) -> bool {
        match stage {
            Stage::PreviousDay => self.previous_day_reported,
            Stage::WakeUp => self.wake_up_reported,
            Stage::Departure => self.departure_reported,
            Stage::Arrival => self.arrival_reported,
            Stage::DailyReport => self.daily_report_submitted,
        }
    }

    pub fn missing_stages(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|st| !self.is_reported(*st))
            .collect()
    }

    pub fn any_reported(&self) -> bool {
        Stage::ORDER.iter().any(|st| self.is_reported(*st))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextAction {
    Submit(Stage),
    /// The pre-report targets a future date: nothing to do until then.
    WaitForNextDay,
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextAction::Submit(stage) => write!(f, "{}", stage),
            NextAction::WaitForNextDay => f.write_str("wait-until-tomorrow"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkflowPhase {
    NotStarted,
    PreviousDayPending,
    WaitingForNextDay,
    WakeUpPending,
    DeparturePending,
    ArrivalPending,
    ReportPending,
    AllComplete,
    DayCompleted,
}

impl WorkflowPhase {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowPhase::NotStarted => "not started",
            WorkflowPhase::PreviousDayPending => "previous-day report pending",
            WorkflowPhase::WaitingForNextDay => "waiting for next day",
            WorkflowPhase::WakeUpPending => "wake-up pending",
            WorkflowPhase::DeparturePending => "departure pending",
            WorkflowPhase::ArrivalPending => "arrival pending",
            WorkflowPhase::ReportPending => "daily report pending",
            WorkflowPhase::AllComplete => "all tasks complete",
            WorkflowPhase::DayCompleted => "day completed",
        }
    }
}

/// Result of `derive_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedStatus {
    pub today: NaiveDate,
    pub state: WorkflowState,
    pub is_all_tasks_complete: bool,
    pub should_enable_actions: bool,
    pub is_waiting_for_next_day: bool,
    pub should_hide_previous_day_card: bool,
    pub next_action: Option<NextAction>,
    pub phase: WorkflowPhase,
    pub(crate) enabled: [bool; 5],
}

impl DerivedStatus {
    pub fn is_stage_enabled(&self, stage: Stage) -> bool {
        self.enabled[stage.index()]
    }

    /// Why a stage is disabled, or `None` when it is submittable.
    pub fn blocked_reason(&self, stage: Stage) -> Option<&'static str> {
        if self.is_stage_enabled(stage) {
            return None;
        }
        if self.state.day_completed {
            Some("the day has already been completed")
        } else if stage == Stage::PreviousDay {
            Some("a previous-day report was already filed for an upcoming date")
        } else if self.is_waiting_for_next_day {
            Some("the previous-day report targets a future date")
        } else {
            Some("the previous-day report has not been submitted")
        }
    }

    /// "End day" is offered while the day is open.
    pub fn can_end_day(&self) -> bool {
        !self.state.day_completed
    }

    /// "Start new day" is the only action left once the day is completed.
    pub fn can_start_new_day(&self) -> bool {
        self.state.day_completed
    }
}
