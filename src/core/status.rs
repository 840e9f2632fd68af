//! Status for one staff member and the manager dashboard.

use crate::core::state::{WorkflowSnapshot, load_workflow_state};
use crate::core::workflow::derive_status;
use crate::db::staff::list_staff;
use crate::errors::AppResult;
use crate::models::staff::StaffMember;
use crate::models::workflow::DerivedStatus;
use chrono::NaiveDate;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct DashboardRow {
    pub staff: StaffMember,
    pub snapshot: WorkflowSnapshot,
    pub derived: DerivedStatus,
}

pub struct StatusLogic;

impl StatusLogic {
    pub fn for_staff(
        conn: &Connection,
        staff_id: &str,
        today: NaiveDate,
    ) -> AppResult<(WorkflowSnapshot, DerivedStatus)> {
        let snapshot = load_workflow_state(conn, staff_id, &today)?;
        let derived = derive_status(&snapshot.state, today);
        Ok((snapshot, derived))
    }

    /// Every registered staff member, each derived the same way as `for_staff`.
    pub fn dashboard(conn: &Connection, today: NaiveDate) -> AppResult<Vec<DashboardRow>> {
        let mut rows = Vec::new();
        for staff in list_staff(conn)? {
            let (snapshot, derived) = Self::for_staff(conn, &staff.id, today)?;
            rows.push(DashboardRow {
                staff,
                snapshot,
                derived,
            });
        }
        Ok(rows)
    }
}
