use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::day::NewDayLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

use super::{StaffContext, cli_notifier};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut ctx = StaffContext::open(cli, cfg)?;
    let notifier = cli_notifier(cfg);

    let record = NewDayLogic::apply(&mut ctx.pool, &notifier, &ctx.staff_id, ctx.today)?;
    success(format!(
        "New day started for {} on {} (record #{})",
        ctx.staff_id, ctx.today, record.id
    ));
    Ok(())
}
