//! Pure derivation of the daily check-in workflow.
//!
//! Every consumer (status view, dashboard, stage submission guards) goes
//! through `derive_status`, so the five-stage logic lives in one place.

use crate::models::stage::Stage;
use crate::models::workflow::{DerivedStatus, NextAction, WorkflowPhase, WorkflowState};
use chrono::NaiveDate;

/// Derive the status view of one staff member's day.
///
/// Total over every input combination: a `report_date` supplied while
/// `previous_day_reported` is false is ignored.
pub fn derive_status(state: &WorkflowState, today: NaiveDate) -> DerivedStatus {
    let report_date = if state.previous_day_reported {
        state.report_date
    } else {
        None
    };

    let is_all_tasks_complete = Stage::ORDER.iter().all(|st| state.is_reported(*st));

    // A plan filed for a later date blocks today's actions; a plan for
    // today (or an overdue one) unlocks them.
    let filed_for_future = matches!(report_date, Some(d) if d > today);
    let should_enable_actions = !filed_for_future;
    let is_waiting_for_next_day = state.previous_day_reported && !should_enable_actions;
    let should_hide_previous_day_card = filed_for_future;

    let next_action = if state.day_completed || is_all_tasks_complete {
        None
    } else if is_waiting_for_next_day {
        Some(NextAction::WaitForNextDay)
    } else {
        Stage::ORDER
            .into_iter()
            .find(|st| !state.is_reported(*st))
            .map(NextAction::Submit)
    };

    let mut enabled = [false; 5];
    for stage in Stage::ORDER {
        enabled[stage.index()] = match stage {
            Stage::PreviousDay => !should_hide_previous_day_card && !state.day_completed,
            _ => {
                state.previous_day_reported && !is_waiting_for_next_day && !state.day_completed
            }
        };
    }

    let phase = phase_for(state, is_all_tasks_complete, next_action);

    DerivedStatus {
        today,
        state: *state,
        is_all_tasks_complete,
        should_enable_actions,
        is_waiting_for_next_day,
        should_hide_previous_day_card,
        next_action,
        phase,
        enabled,
    }
}

fn phase_for(
    state: &WorkflowState,
    all_complete: bool,
    next_action: Option<NextAction>,
) -> WorkflowPhase {
    if state.day_completed {
        return WorkflowPhase::DayCompleted;
    }
    if all_complete {
        return WorkflowPhase::AllComplete;
    }
    match next_action {
        Some(NextAction::WaitForNextDay) => WorkflowPhase::WaitingForNextDay,
        Some(NextAction::Submit(Stage::PreviousDay)) if !state.any_reported() => {
            WorkflowPhase::NotStarted
        }
        Some(NextAction::Submit(Stage::PreviousDay)) => WorkflowPhase::PreviousDayPending,
        Some(NextAction::Submit(Stage::WakeUp)) => WorkflowPhase::WakeUpPending,
        Some(NextAction::Submit(Stage::Departure)) => WorkflowPhase::DeparturePending,
        Some(NextAction::Submit(Stage::Arrival)) => WorkflowPhase::ArrivalPending,
        Some(NextAction::Submit(Stage::DailyReport)) => WorkflowPhase::ReportPending,
        None => WorkflowPhase::AllComplete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        today().succ_opt().unwrap()
    }

    fn state_from_bits(bits: u8) -> WorkflowState {
        WorkflowState {
            previous_day_reported: bits & 0b00001 != 0,
            report_date: if bits & 0b00001 != 0 { Some(today()) } else { None },
            wake_up_reported: bits & 0b00010 != 0,
            departure_reported: bits & 0b00100 != 0,
            arrival_reported: bits & 0b01000 != 0,
            daily_report_submitted: bits & 0b10000 != 0,
            day_completed: false,
        }
    }

    #[test]
    fn next_action_is_earliest_unset_stage_for_every_combination() {
        for bits in 0u8..32 {
            let state = state_from_bits(bits);
            let derived = derive_status(&state, today());

            let expected = Stage::ORDER
                .into_iter()
                .find(|st| !state.is_reported(*st))
                .map(NextAction::Submit);

            assert_eq!(derived.next_action, expected, "bits = {bits:05b}");
        }
    }

    #[test]
    fn all_tasks_complete_iff_every_flag_set() {
        for bits in 0u8..32 {
            let derived = derive_status(&state_from_bits(bits), today());
            assert_eq!(derived.is_all_tasks_complete, bits == 0b11111, "bits = {bits:05b}");
        }
    }

    #[test]
    fn without_previous_day_report_only_that_stage_is_enabled() {
        for bits in (0u8..32).filter(|b| b & 1 == 0) {
            let derived = derive_status(&state_from_bits(bits), today());
            assert!(derived.is_stage_enabled(Stage::PreviousDay));
            for stage in &Stage::ORDER[1..] {
                assert!(!derived.is_stage_enabled(*stage), "{stage} enabled, bits = {bits:05b}");
            }
        }
    }

    #[test]
    fn waiting_for_next_day_overrides_wakeup() {
        let state = WorkflowState {
            previous_day_reported: true,
            report_date: Some(tomorrow()),
            ..Default::default()
        };
        let derived = derive_status(&state, today());

        assert!(derived.is_waiting_for_next_day);
        assert!(!derived.should_enable_actions);
        assert_eq!(derived.next_action, Some(NextAction::WaitForNextDay));
        assert_eq!(derived.phase, WorkflowPhase::WaitingForNextDay);
    }

    #[test]
    fn report_date_today_enables_actions() {
        let state = WorkflowState {
            previous_day_reported: true,
            report_date: Some(today()),
            ..Default::default()
        };
        assert!(derive_status(&state, today()).should_enable_actions);

        let ahead = WorkflowState {
            report_date: Some(tomorrow()),
            ..state
        };
        assert!(!derive_status(&ahead, today()).should_enable_actions);
    }

    #[test]
    fn report_date_without_report_is_ignored() {
        let state = WorkflowState {
            previous_day_reported: false,
            report_date: Some(tomorrow()),
            ..Default::default()
        };
        let derived = derive_status(&state, today());

        assert!(derived.should_enable_actions);
        assert!(!derived.is_waiting_for_next_day);
        assert!(!derived.should_hide_previous_day_card);
        assert_eq!(derived.next_action, Some(NextAction::Submit(Stage::PreviousDay)));
    }

    #[test]
    fn scenario_a_fresh_staff_member() {
        let derived = derive_status(&WorkflowState::default(), today());

        assert_eq!(derived.next_action, Some(NextAction::Submit(Stage::PreviousDay)));
        assert_eq!(derived.phase, WorkflowPhase::NotStarted);
        for stage in &Stage::ORDER[1..] {
            assert!(!derived.is_stage_enabled(*stage));
        }
    }

    #[test]
    fn scenario_b_planned_for_today() {
        let state = WorkflowState {
            previous_day_reported: true,
            report_date: Some(today()),
            ..Default::default()
        };
        let derived = derive_status(&state, today());

        assert_eq!(derived.next_action, Some(NextAction::Submit(Stage::WakeUp)));
        assert!(!derived.should_hide_previous_day_card);
        assert!(derived.is_stage_enabled(Stage::WakeUp));
        assert_eq!(derived.phase, WorkflowPhase::WakeUpPending);
    }

    #[test]
    fn scenario_c_planned_for_tomorrow() {
        let state = WorkflowState {
            previous_day_reported: true,
            report_date: Some(tomorrow()),
            ..Default::default()
        };
        let derived = derive_status(&state, today());

        assert!(derived.should_hide_previous_day_card);
        assert!(derived.is_waiting_for_next_day);
        assert!(!derived.is_stage_enabled(Stage::PreviousDay));
        for stage in &Stage::ORDER[1..] {
            assert!(!derived.is_stage_enabled(*stage));
        }
    }

    #[test]
    fn scenario_d_all_tasks_complete() {
        let derived = derive_status(&state_from_bits(0b11111), today());

        assert!(derived.is_all_tasks_complete);
        assert_eq!(derived.next_action, None);
        assert_eq!(derived.phase, WorkflowPhase::AllComplete);
        assert!(derived.can_end_day());
        assert!(!derived.can_start_new_day());
    }

    #[test]
    fn scenario_e_day_completed() {
        let state = WorkflowState {
            day_completed: true,
            ..state_from_bits(0b00111)
        };
        let derived = derive_status(&state, today());

        assert_eq!(derived.next_action, None);
        assert_eq!(derived.phase, WorkflowPhase::DayCompleted);
        for stage in &Stage::ORDER {
            assert!(!derived.is_stage_enabled(*stage));
            assert_eq!(
                derived.blocked_reason(*stage),
                Some("the day has already been completed")
            );
        }
        assert!(derived.can_start_new_day());
        assert!(!derived.can_end_day());
    }

    #[test]
    fn overdue_plan_still_unlocks_the_day() {
        let state = WorkflowState {
            previous_day_reported: true,
            report_date: today().pred_opt(),
            ..Default::default()
        };
        let derived = derive_status(&state, today());

        assert!(derived.should_enable_actions);
        assert_eq!(derived.next_action, Some(NextAction::Submit(Stage::WakeUp)));
    }
}
