//! Human-readable rendering of a derived workflow status.

use crate::models::attendance::AttendanceRecord;
use crate::models::stage::Stage;
use crate::models::workflow::{DerivedStatus, NextAction};
use crate::utils::colors::{GREY, RESET, YELLOW, colorize_optional, stage_mark};
use crate::utils::time::fmt_opt_time;

/// One-line description of what the staff member should do next.
pub fn next_action_text(derived: &DerivedStatus) -> String {
    match derived.next_action {
        Some(NextAction::Submit(stage)) => format!("submit {} ({})", stage.label(), stage),
        Some(NextAction::WaitForNextDay) => {
            let when = derived
                .state
                .report_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "tomorrow".to_string());
            format!("wait until {when}: the previous-day report is already filed")
        }
        None if derived.state.day_completed => "day completed: start a new day".to_string(),
        None => "all tasks complete: end the day".to_string(),
    }
}

/// Multi-line stage card view for one staff member.
pub fn render_status(
    staff_id: &str,
    derived: &DerivedStatus,
    record: Option<&AttendanceRecord>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Staff: {staff_id} | Date: {} | Phase: {}\n",
        derived.today,
        derived.phase.label()
    ));

    for stage in Stage::ORDER {
        if stage == Stage::PreviousDay && derived.should_hide_previous_day_card {
            continue;
        }

        let done = derived.state.is_reported(stage);
        let time = record.and_then(|r| r.stage_time(stage));
        let detail = match stage {
            Stage::PreviousDay => derived
                .state
                .report_date
                .filter(|_| done)
                .map(|d| format!("for {d}"))
                .unwrap_or_else(|| "-".to_string()),
            Stage::DailyReport => if done { "submitted" } else { "-" }.to_string(),
            _ => fmt_opt_time(time),
        };

        let gate = match derived.blocked_reason(stage) {
            Some(reason) => format!("{GREY}(locked: {reason}){RESET}"),
            None => String::new(),
        };

        out.push_str(&format!(
            "  {} {:<20} {:<12} {}\n",
            stage_mark(done),
            stage.label(),
            colorize_optional(&detail),
            gate
        ));
    }

    out.push_str(&format!(
        "{YELLOW}➜ Next:{RESET} {}\n",
        next_action_text(derived)
    ));
    out
}
