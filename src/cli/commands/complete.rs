use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::complete::CompleteLogic;
use crate::core::status::StatusLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::io::{self, Write};

use super::{StaffContext, cli_notifier};

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();
    Ok(ans == "y" || ans == "yes")
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let yes = matches!(cli.command, Commands::Complete { yes: true });

    let mut ctx = StaffContext::open(cli, cfg)?;

    if !yes {
        let (_, derived) = StatusLogic::for_staff(&ctx.pool.conn, &ctx.staff_id, ctx.today)?;
        if derived.can_end_day() && !confirm(&CompleteLogic::confirmation_prompt(&derived))? {
            info("Day not completed.");
            return Ok(());
        }
    }

    let notifier = cli_notifier(cfg);
    let outcome = CompleteLogic::apply(&mut ctx.pool, &notifier, &ctx.staff_id, ctx.today)?;

    if outcome.all_tasks_complete {
        success(outcome.message);
    } else {
        warning(outcome.message);
    }
    Ok(())
}
