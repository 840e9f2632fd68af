use crate::cli::parser::{Cli, ShiftAction};
use crate::config::Config;
use crate::core::roster::require_staff;
use crate::core::shifts::{ShiftLogic, detect_conflicts};
use crate::db::shifts::list_shifts;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date::{parse_date, parse_period};
use crate::utils::table::{Column, Table};
use crate::utils::time::{mins2readable, minutes_between, parse_time};

use super::{open_pool, resolve_staff};

fn bounds(period: &Option<String>) -> AppResult<Option<(chrono::NaiveDate, chrono::NaiveDate)>> {
    match period {
        Some(p) => parse_period(p),
        None => Ok(None),
    }
}

pub fn handle(action: &ShiftAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        ShiftAction::Add {
            date,
            start,
            end,
            worksite,
        } => {
            let staff_id = resolve_staff(cli, cfg)?;
            require_staff(&pool.conn, &staff_id)?;

            let date = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let start = parse_time(start).ok_or_else(|| AppError::InvalidTime(start.clone()))?;
            let end = parse_time(end).ok_or_else(|| AppError::InvalidTime(end.clone()))?;

            let shift = ShiftLogic::add(&mut pool, &staff_id, date, start, end, worksite.as_deref())?;
            success(format!("Shift #{} added for {} on {}", shift.id, staff_id, date));
        }
        ShiftAction::Approve { id } => {
            let shift = ShiftLogic::approve(&mut pool, *id)?;
            success(format!("Shift #{} approved for {}", shift.id, shift.staff_id));
        }
        ShiftAction::List { period } => {
            let shifts = list_shifts(&pool.conn, bounds(period)?)?;
            if shifts.is_empty() {
                warning("No shifts found.");
                return Ok(());
            }

            let mut table = Table::new(
                vec![
                    Column::auto("ID"),
                    Column::auto("Staff"),
                    Column::auto("Date"),
                    Column::auto("Start"),
                    Column::auto("End"),
                    Column::auto("Length"),
                    Column::auto("Worksite"),
                    Column::auto("Status"),
                ],
                cfg.separator(),
            );
            for s in shifts {
                table.add_row(vec![
                    s.id.to_string(),
                    s.staff_id,
                    s.date.to_string(),
                    s.start.format("%H:%M").to_string(),
                    s.end.format("%H:%M").to_string(),
                    mins2readable(minutes_between(s.start, s.end)),
                    s.worksite.unwrap_or_else(|| "-".into()),
                    s.status.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        ShiftAction::Conflicts { period } => {
            let shifts = list_shifts(&pool.conn, bounds(period)?)?;
            let conflicts = detect_conflicts(&shifts);
            if conflicts.is_empty() {
                success("No overlapping shifts.");
                return Ok(());
            }

            for c in &conflicts {
                warning(format!(
                    "{} on {}: shift #{} overlaps #{} by {} min",
                    c.staff_id, c.date, c.first_id, c.second_id, c.overlap_minutes
                ));
            }
        }
    }

    Ok(())
}
