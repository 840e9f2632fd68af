//! Shift schedules: registration, approval and overlap detection.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::shifts;
use crate::errors::{AppError, AppResult};
use crate::models::shift::{ShiftConflict, ShiftSchedule, ShiftStatus};
use crate::utils::time::minutes_between;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// Every overlapping pair of shifts belonging to the same staff member
/// on the same date. Output is ordered by staff, date and start time.
pub fn detect_conflicts(shifts: &[ShiftSchedule]) -> Vec<ShiftConflict> {
    let mut groups: BTreeMap<(&str, NaiveDate), Vec<&ShiftSchedule>> = BTreeMap::new();
    for s in shifts {
        groups.entry((s.staff_id.as_str(), s.date)).or_default().push(s);
    }

    let mut conflicts = Vec::new();
    for ((staff_id, date), mut group) in groups {
        group.sort_by_key(|s| (s.start, s.id));

        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                // sorted by start: nothing later can overlap `a`
                if b.start >= a.end {
                    break;
                }
                let overlap_end = a.end.min(b.end);
                conflicts.push(ShiftConflict {
                    staff_id: staff_id.to_string(),
                    date,
                    first_id: a.id,
                    second_id: b.id,
                    overlap_minutes: minutes_between(b.start, overlap_end),
                });
            }
        }
    }
    conflicts
}

pub struct ShiftLogic;

impl ShiftLogic {
    pub fn add(
        pool: &mut DbPool,
        staff_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        worksite: Option<&str>,
    ) -> AppResult<ShiftSchedule> {
        if end <= start {
            return Err(AppError::InvalidTime(format!(
                "shift end {} must be after start {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }

        let tx = pool.conn.transaction()?;
        let shift = shifts::insert_shift(&tx, staff_id, &date, &start, &end, worksite)?;
        ttlog(
            &tx,
            "shift_add",
            staff_id,
            &format!(
                "Shift #{} on {} {}-{}",
                shift.id,
                date,
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
        )?;
        tx.commit().map_err(AppError::write_failed)?;
        Ok(shift)
    }

    /// Approve a pending shift unless it overlaps an approved one.
    pub fn approve(pool: &mut DbPool, shift_id: i64) -> AppResult<ShiftSchedule> {
        let tx = pool.conn.transaction()?;

        let shift = shifts::get_shift(&tx, shift_id)?
            .ok_or_else(|| AppError::NotFound(format!("shift #{shift_id}")))?;
        if shift.status == ShiftStatus::Approved {
            return Err(AppError::AlreadyRecorded(format!(
                "shift #{shift_id} is already approved"
            )));
        }

        let mut candidates = shifts::approved_shifts_for(&tx, &shift.staff_id, &shift.date)?;
        candidates.push(shift.clone());
        if let Some(c) = detect_conflicts(&candidates)
            .into_iter()
            .find(|c| c.involves(shift_id))
        {
            let other = if c.first_id == shift_id {
                c.second_id
            } else {
                c.first_id
            };
            return Err(AppError::ShiftConflict(format!(
                "shift #{shift_id} overlaps approved shift #{other} by {} min",
                c.overlap_minutes
            )));
        }

        shifts::set_shift_status(&tx, shift_id, ShiftStatus::Approved)?;
        ttlog(
            &tx,
            "shift_approve",
            &shift.staff_id,
            &format!("Shift #{shift_id} approved"),
        )?;
        tx.commit().map_err(AppError::write_failed)?;

        Ok(ShiftSchedule {
            status: ShiftStatus::Approved,
            ..shift
        })
    }
}
