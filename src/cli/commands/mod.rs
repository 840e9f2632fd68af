//! Subcommand handlers and the context they share.

pub mod alerts;
pub mod complete;
pub mod config;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod new_day;
pub mod plan;
pub mod shift;
pub mod stage;
pub mod staff;
pub mod status;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::notify::{AttendanceObserver, Notifier};
use crate::core::roster::require_staff;
use crate::core::status::StatusLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::ui::status::next_action_text;
use crate::utils::date::{parse_date, today};
use chrono::NaiveDate;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn resolve_today(cli: &Cli) -> AppResult<NaiveDate> {
    match &cli.today {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(today()),
    }
}

/// `--staff`, falling back to `default_staff` from the config.
pub(crate) fn resolve_staff(cli: &Cli, cfg: &Config) -> AppResult<String> {
    cli.staff
        .clone()
        .or_else(|| cfg.default_staff.clone())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::MissingField("staff id (use --staff or set default_staff)".into()))
}

/// Everything a staff-scoped command needs: database, registered staff id, date.
pub(crate) struct StaffContext {
    pub pool: DbPool,
    pub staff_id: String,
    pub today: NaiveDate,
}

impl StaffContext {
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let staff_id = resolve_staff(cli, cfg)?;
        let today = resolve_today(cli)?;
        let pool = open_pool(cfg)?;
        require_staff(&pool.conn, &staff_id)?;
        Ok(Self {
            pool,
            staff_id,
            today,
        })
    }
}

/// Re-derives the status from its own connection after every mutation
/// and prints the next action.
struct StatusRefresh {
    db_path: String,
}

impl AttendanceObserver for StatusRefresh {
    fn attendance_updated(&self, staff_id: &str, date: NaiveDate) {
        let refreshed = DbPool::new(&self.db_path)
            .map_err(AppError::from)
            .and_then(|pool| StatusLogic::for_staff(&pool.conn, staff_id, date));

        match refreshed {
            Ok((_, derived)) => info(format!("Next: {}", next_action_text(&derived))),
            Err(e) => warning(format!("Could not refresh status: {e}")),
        }
    }
}

pub(crate) fn cli_notifier(cfg: &Config) -> Notifier {
    let mut notifier = Notifier::new();
    notifier.subscribe(Box::new(StatusRefresh {
        db_path: cfg.database.clone(),
    }));
    notifier
}
