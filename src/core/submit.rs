//! Stage submissions: previous-day plan, wake-up, departure, arrival and
//! the daily report.
//!
//! Each submission re-derives the status inside its transaction and
//! refuses stages that are gated or already satisfied.

use crate::core::link::link_previous_day_report;
use crate::core::notify::Notifier;
use crate::core::state::{WorkflowSnapshot, load_workflow_state};
use crate::core::workflow::derive_status;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{attendance, reports};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, StagePayload};
use crate::models::report::{DailyReport, DailyReportStatus, PreviousDayPlan, PreviousDayReport};
use crate::models::stage::Stage;
use crate::models::workflow::DerivedStatus;
use crate::utils::date::next_day;
use crate::utils::gps::normalize_gps;
use crate::utils::time::fmt_opt_time;
use chrono::NaiveDate;

/// Which photo references a previous-day plan must carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoPolicy {
    pub require_route_photo: bool,
    pub require_appearance_photo: bool,
}

fn blank(v: &Option<String>) -> bool {
    v.as_deref().is_none_or(|s| s.trim().is_empty())
}

fn ensure_submittable(
    snapshot: &WorkflowSnapshot,
    derived: &DerivedStatus,
    stage: Stage,
) -> AppResult<()> {
    if let Some(reason) = derived.blocked_reason(stage) {
        return Err(AppError::StageBlocked {
            stage: stage.to_string(),
            reason: reason.to_string(),
        });
    }

    // The previous-day stage has its own duplicate rules.
    if stage == Stage::PreviousDay {
        return Ok(());
    }

    if snapshot.state.is_reported(stage) {
        return Err(AppError::AlreadyRecorded(format!(
            "{} already reported for {} on {}",
            stage.label(),
            snapshot.staff_id,
            snapshot.date
        )));
    }

    if let Some(prev) = stage.predecessor()
        && !snapshot.state.is_reported(prev)
    {
        return Err(AppError::StageBlocked {
            stage: stage.to_string(),
            reason: format!("{} not reported yet", prev.label()),
        });
    }

    Ok(())
}

pub struct SubmitLogic;

impl SubmitLogic {
    /// Submit the plan for `plan.report_date` (default: the day after `today`).
    pub fn previous_day(
        pool: &mut DbPool,
        notifier: &Notifier,
        policy: PhotoPolicy,
        staff_id: &str,
        today: NaiveDate,
        plan: &PreviousDayPlan,
    ) -> AppResult<PreviousDayReport> {
        let report_date = match plan.report_date {
            Some(d) => d,
            None => next_day(&today)?,
        };
        if report_date < today {
            return Err(AppError::InvalidDate(format!(
                "report date {report_date} is in the past"
            )));
        }
        if policy.require_route_photo && blank(&plan.route_photo) {
            return Err(AppError::MissingField("route photo".into()));
        }
        if policy.require_appearance_photo && blank(&plan.appearance_photo) {
            return Err(AppError::MissingField("appearance photo".into()));
        }

        let tx = pool.conn.transaction()?;

        let snapshot = load_workflow_state(&tx, staff_id, &today)?;
        let derived = derive_status(&snapshot.state, today);
        ensure_submittable(&snapshot, &derived, Stage::PreviousDay)?;

        if let Some(unused) = reports::get_unused_previous_day_report(&tx, staff_id)? {
            return Err(AppError::AlreadyRecorded(format!(
                "a previous-day report for {} is still waiting to be used",
                unused.report_date
            )));
        }
        if reports::find_report_for_date(&tx, staff_id, &report_date)?.is_some() {
            return Err(AppError::AlreadyRecorded(format!(
                "previous-day report for {report_date} already submitted"
            )));
        }

        let report = reports::insert_previous_day_report(&tx, staff_id, &report_date, plan)?;
        ttlog(
            &tx,
            "plan",
            staff_id,
            &format!("Previous-day report #{} for {}", report.id, report_date),
        )?;
        tx.commit().map_err(AppError::write_failed)?;

        notifier.notify(staff_id, today);
        Ok(report)
    }

    /// Submit wake-up, departure or arrival for `today`.
    pub fn attendance_stage(
        pool: &mut DbPool,
        notifier: &Notifier,
        staff_id: &str,
        today: NaiveDate,
        stage: Stage,
        payload: &StagePayload,
    ) -> AppResult<AttendanceRecord> {
        if !stage.is_attendance_stage() {
            return Err(AppError::Other(format!(
                "stage '{stage}' is not an attendance stage"
            )));
        }
        if payload.time.is_none() {
            return Err(AppError::MissingField(format!(
                "{} time",
                stage.label().to_lowercase()
            )));
        }

        let mut payload = payload.clone();
        if let Some(gps) = &payload.gps {
            payload.gps = Some(normalize_gps(gps)?);
        }

        let tx = pool.conn.transaction()?;

        let snapshot = load_workflow_state(&tx, staff_id, &today)?;
        let derived = derive_status(&snapshot.state, today);
        ensure_submittable(&snapshot, &derived, stage)?;

        let record = attendance::upsert_attendance_stage(
            &tx,
            staff_id,
            &today,
            stage,
            &payload,
            snapshot.observed_version(),
        )?;

        if let Some(report_id) = link_previous_day_report(&tx, staff_id, record.id)? {
            ttlog(
                &tx,
                "link",
                staff_id,
                &format!("Previous-day report #{report_id} fulfilled by record #{}", record.id),
            )?;
        }

        ttlog(
            &tx,
            stage.as_str(),
            staff_id,
            &format!(
                "{} at {} on {}",
                stage.label(),
                fmt_opt_time(payload.time),
                today
            ),
        )?;
        tx.commit().map_err(AppError::write_failed)?;

        notifier.notify(staff_id, today);
        Ok(record)
    }

    /// Save the daily work report; a draft does not satisfy the stage.
    pub fn daily_report(
        pool: &mut DbPool,
        notifier: &Notifier,
        staff_id: &str,
        today: NaiveDate,
        content: &str,
        draft: bool,
    ) -> AppResult<DailyReport> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::MissingField("daily report content".into()));
        }

        let tx = pool.conn.transaction()?;

        let snapshot = load_workflow_state(&tx, staff_id, &today)?;
        let derived = derive_status(&snapshot.state, today);
        ensure_submittable(&snapshot, &derived, Stage::DailyReport)?;

        let status = if draft {
            DailyReportStatus::Draft
        } else {
            DailyReportStatus::Submitted
        };
        let report = reports::save_daily_report(&tx, staff_id, &today, content, status)?;
        ttlog(
            &tx,
            "report",
            staff_id,
            &format!("Daily report {} for {}", status.to_db_str(), today),
        )?;
        tx.commit().map_err(AppError::write_failed)?;

        notifier.notify(staff_id, today);
        Ok(report)
    }
}
