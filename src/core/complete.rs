//! Ending the reporting day.

use crate::core::notify::Notifier;
use crate::core::state::load_workflow_state;
use crate::core::workflow::derive_status;
use crate::db::alerts::insert_alert;
use crate::db::attendance::mark_day_complete;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::alert::INCOMPLETE_DAY;
use crate::models::attendance::AttendanceRecord;
use crate::models::stage::Stage;
use crate::models::workflow::DerivedStatus;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub message: String,
    pub all_tasks_complete: bool,
    pub missing_stages: Vec<Stage>,
    pub record: AttendanceRecord,
}

fn stage_list(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct CompleteLogic;

impl CompleteLogic {
    /// Confirmation copy shown before ending the day.
    pub fn confirmation_prompt(derived: &DerivedStatus) -> String {
        if derived.is_all_tasks_complete {
            "All tasks are complete. End the day now?".to_string()
        } else {
            format!(
                "Some tasks are still missing ({}). End the day anyway?",
                stage_list(&derived.state.missing_stages())
            )
        }
    }

    /// Mark the day completed. Missing stages do not block completion
    /// but raise an `incomplete_day` alert.
    pub fn apply(
        pool: &mut DbPool,
        notifier: &Notifier,
        staff_id: &str,
        today: NaiveDate,
    ) -> AppResult<CompletionOutcome> {
        let tx = pool.conn.transaction()?;

        let snapshot = load_workflow_state(&tx, staff_id, &today)?;
        let derived = derive_status(&snapshot.state, today);
        if !derived.can_end_day() {
            return Err(AppError::AlreadyRecorded(format!(
                "day {today} already completed for {staff_id}"
            )));
        }

        let record = mark_day_complete(&tx, staff_id, &today, snapshot.observed_version())?;
        let missing = snapshot.state.missing_stages();
        let all_tasks_complete = missing.is_empty();

        let message = if all_tasks_complete {
            format!("Day {today} completed for {staff_id}.")
        } else {
            let msg = format!(
                "Day {today} completed for {staff_id} with missing tasks: {}.",
                stage_list(&missing)
            );
            insert_alert(&tx, staff_id, &today, INCOMPLETE_DAY, &msg)?;
            msg
        };

        ttlog(&tx, "complete", staff_id, &message)?;
        tx.commit().map_err(AppError::write_failed)?;

        notifier.notify(staff_id, today);
        Ok(CompletionOutcome {
            message,
            all_tasks_complete,
            missing_stages: missing,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::recording::Recorder;
    use crate::core::submit::{PhotoPolicy, SubmitLogic};
    use crate::db::alerts::list_alerts;
    use crate::db::test_support::{day, memory_pool, t};
    use crate::models::attendance::{AttendanceStatus, StagePayload};
    use crate::models::report::PreviousDayPlan;

    fn finish_all_stages(pool: &mut DbPool, n: &Notifier, today: NaiveDate) {
        let plan = PreviousDayPlan {
            report_date: Some(today),
            ..Default::default()
        };
        SubmitLogic::previous_day(pool, n, PhotoPolicy::default(), "alice", today, &plan).unwrap();
        for (stage, at) in [
            (Stage::WakeUp, "06:00"),
            (Stage::Departure, "07:00"),
            (Stage::Arrival, "08:00"),
        ] {
            SubmitLogic::attendance_stage(pool, n, "alice", today, stage, &StagePayload::at(t(at)))
                .unwrap();
        }
        SubmitLogic::daily_report(pool, n, "alice", today, "done", false).unwrap();
    }

    #[test]
    fn completing_a_full_day() {
        let mut pool = memory_pool();
        let rec = Recorder::default();
        let mut n = Notifier::new();
        n.subscribe(Box::new(rec.clone()));
        let today = day(14);
        finish_all_stages(&mut pool, &n, today);

        let out = CompleteLogic::apply(&mut pool, &n, "alice", today).unwrap();
        assert!(out.all_tasks_complete);
        assert!(out.missing_stages.is_empty());
        assert_eq!(out.record.status, AttendanceStatus::Complete);
        assert!(list_alerts(&pool.conn, Some("alice")).unwrap().is_empty());
        assert_eq!(rec.count(), 6);

        let snap = load_workflow_state(&pool.conn, "alice", &today).unwrap();
        let derived = derive_status(&snap.state, today);
        assert!(derived.state.day_completed);
        assert!(derived.can_start_new_day());
        assert_eq!(derived.next_action, None);
    }

    #[test]
    fn incomplete_day_raises_alert() {
        let mut pool = memory_pool();
        let n = Notifier::new();

        let out = CompleteLogic::apply(&mut pool, &n, "alice", day(14)).unwrap();
        assert!(!out.all_tasks_complete);
        assert_eq!(out.missing_stages.len(), 5);

        let alerts = list_alerts(&pool.conn, Some("alice")).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, INCOMPLETE_DAY);
    }

    #[test]
    fn completing_twice_is_already_recorded() {
        let mut pool = memory_pool();
        let n = Notifier::new();
        CompleteLogic::apply(&mut pool, &n, "alice", day(14)).unwrap();

        let err = CompleteLogic::apply(&mut pool, &n, "alice", day(14)).unwrap_err();
        assert_eq!(err.code(), "ALREADY_RECORDED");
    }

    #[test]
    fn prompt_copy_depends_on_completeness() {
        let mut pool = memory_pool();
        let n = Notifier::new();
        let today = day(14);

        let snap = load_workflow_state(&pool.conn, "alice", &today).unwrap();
        let prompt = CompleteLogic::confirmation_prompt(&derive_status(&snap.state, today));
        assert!(prompt.contains("still missing"));

        finish_all_stages(&mut pool, &n, today);
        let snap = load_workflow_state(&pool.conn, "alice", &today).unwrap();
        let prompt = CompleteLogic::confirmation_prompt(&derive_status(&snap.state, today));
        assert!(prompt.starts_with("All tasks are complete"));
    }
}
