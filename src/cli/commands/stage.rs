//! Handlers for the attendance stages and the daily report.

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::submit::SubmitLogic;
use crate::errors::AppResult;
use crate::models::attendance::StagePayload;
use crate::models::stage::Stage;
use crate::ui::messages::success;
use crate::utils::time::{fmt_opt_time, now_hhmm, parse_optional_time};
use chrono::NaiveTime;

use super::{StaffContext, cli_notifier};

fn stage_time(time: &Option<String>, now: bool) -> AppResult<Option<NaiveTime>> {
    if now {
        return Ok(Some(now_hhmm()));
    }
    parse_optional_time(time.as_ref())
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (stage, payload) = match &cli.command {
        Commands::Wakeup { time, now, notes } => (
            Stage::WakeUp,
            StagePayload {
                time: stage_time(time, *now)?,
                notes: notes.clone(),
                ..Default::default()
            },
        ),
        Commands::Depart {
            time,
            now,
            route_photo,
            notes,
        } => (
            Stage::Departure,
            StagePayload {
                time: stage_time(time, *now)?,
                notes: notes.clone(),
                photo: route_photo.clone(),
                ..Default::default()
            },
        ),
        Commands::Arrive {
            time,
            now,
            location,
            gps,
            appearance_photo,
            notes,
        } => (
            Stage::Arrival,
            StagePayload {
                time: stage_time(time, *now)?,
                notes: notes.clone(),
                photo: appearance_photo.clone(),
                location: location.clone(),
                gps: gps.clone(),
            },
        ),
        Commands::Report { content, draft } => {
            let mut ctx = StaffContext::open(cli, cfg)?;
            let notifier = cli_notifier(cfg);
            let report = SubmitLogic::daily_report(
                &mut ctx.pool,
                &notifier,
                &ctx.staff_id,
                ctx.today,
                content.as_deref().unwrap_or_default(),
                *draft,
            )?;
            let what = if *draft { "saved as draft" } else { "submitted" };
            success(format!("Daily report for {} {what}", report.date));
            return Ok(());
        }
        _ => return Ok(()),
    };

    let mut ctx = StaffContext::open(cli, cfg)?;
    let notifier = cli_notifier(cfg);
    let record = SubmitLogic::attendance_stage(
        &mut ctx.pool,
        &notifier,
        &ctx.staff_id,
        ctx.today,
        stage,
        &payload,
    )?;

    success(format!(
        "{} recorded at {} for {} on {}",
        stage.label(),
        fmt_opt_time(record.stage_time(stage)),
        ctx.staff_id,
        ctx.today
    ));
    Ok(())
}
