//! Starting a fresh day after completion.

use crate::core::notify::Notifier;
use crate::db::attendance::start_new_day;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::reports::archive_daily_reports;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use chrono::NaiveDate;

pub struct NewDayLogic;

impl NewDayLogic {
    /// Reset any open record, archive the day's report and open a pending record.
    pub fn apply(
        pool: &mut DbPool,
        notifier: &Notifier,
        staff_id: &str,
        today: NaiveDate,
    ) -> AppResult<AttendanceRecord> {
        let tx = pool.conn.transaction()?;

        let record = start_new_day(&tx, staff_id, &today)?;
        let archived = archive_daily_reports(&tx, staff_id, &today)?;

        ttlog(
            &tx,
            "new_day",
            staff_id,
            &format!(
                "New day started on {today} (record #{}, {archived} report(s) archived)",
                record.id
            ),
        )?;
        tx.commit().map_err(AppError::write_failed)?;

        notifier.notify(staff_id, today);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::complete::CompleteLogic;
    use crate::core::state::load_workflow_state;
    use crate::core::workflow::derive_status;
    use crate::db::attendance::list_records;
    use crate::db::test_support::{day, memory_pool};
    use crate::models::attendance::AttendanceStatus;
    use crate::models::stage::Stage;
    use crate::models::workflow::{NextAction, WorkflowPhase};

    #[test]
    fn new_day_after_completion_reopens_the_workflow() {
        let mut pool = memory_pool();
        let n = Notifier::new();
        let today = day(14);
        CompleteLogic::apply(&mut pool, &n, "alice", today).unwrap();

        let record = NewDayLogic::apply(&mut pool, &n, "alice", today).unwrap();
        assert_eq!(record.status, AttendanceStatus::Pending);

        let snap = load_workflow_state(&pool.conn, "alice", &today).unwrap();
        let derived = derive_status(&snap.state, today);
        assert!(!derived.state.day_completed);
        assert_eq!(derived.phase, WorkflowPhase::NotStarted);
        assert_eq!(
            derived.next_action,
            Some(NextAction::Submit(Stage::PreviousDay))
        );

        // both records coexist for the same date
        let all = list_records(&pool.conn, Some("alice"), None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn new_day_resets_an_open_record() {
        let mut pool = memory_pool();
        let n = Notifier::new();
        let first = NewDayLogic::apply(&mut pool, &n, "alice", day(14)).unwrap();
        let second = NewDayLogic::apply(&mut pool, &n, "alice", day(14)).unwrap();
        assert_ne!(first.id, second.id);

        let all = list_records(&pool.conn, Some("alice"), None).unwrap();
        let reset = all.iter().find(|r| r.id == first.id).unwrap();
        assert_eq!(reset.status, AttendanceStatus::Reset);
    }
}
