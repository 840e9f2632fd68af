use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::submit::SubmitLogic;
use crate::errors::{AppError, AppResult};
use crate::models::report::PreviousDayPlan;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::time::parse_optional_time;

use super::{StaffContext, cli_notifier};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Plan {
        report_date,
        wake,
        depart,
        arrive,
        route_photo,
        appearance_photo,
        notes,
    } = &cli.command
    {
        let report_date = match report_date {
            Some(s) => Some(parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?),
            None => None,
        };

        let plan = PreviousDayPlan {
            report_date,
            planned_wake_up: parse_optional_time(wake.as_ref())?,
            planned_departure: parse_optional_time(depart.as_ref())?,
            planned_arrival: parse_optional_time(arrive.as_ref())?,
            route_photo: route_photo.clone(),
            appearance_photo: appearance_photo.clone(),
            notes: notes.clone(),
        };

        let mut ctx = StaffContext::open(cli, cfg)?;
        let notifier = cli_notifier(cfg);
        let report = SubmitLogic::previous_day(
            &mut ctx.pool,
            &notifier,
            cfg.photo_policy(),
            &ctx.staff_id,
            ctx.today,
            &plan,
        )?;

        success(format!(
            "Previous-day report #{} for {} submitted",
            report.id, report.report_date
        ));
    }
    Ok(())
}
