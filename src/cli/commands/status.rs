use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::ui::status::{next_action_text, render_status};
use crate::utils::colors::stage_mark;
use crate::utils::table::{Column, Table};

use super::{StaffContext, open_pool, resolve_today};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let all = matches!(cli.command, Commands::Status { all: true });

    if !all {
        let ctx = StaffContext::open(cli, cfg)?;
        let (snapshot, derived) = StatusLogic::for_staff(&ctx.pool.conn, &ctx.staff_id, ctx.today)?;
        print!(
            "{}",
            render_status(&ctx.staff_id, &derived, snapshot.day_record())
        );
        return Ok(());
    }

    let today = resolve_today(cli)?;
    let pool = open_pool(cfg)?;
    let rows = StatusLogic::dashboard(&pool.conn, today)?;
    if rows.is_empty() {
        warning("No staff members registered.");
        return Ok(());
    }

    header(format!("Attendance dashboard {today}"));
    let mut table = Table::new(
        vec![
            Column::auto("Staff"),
            Column::auto("Phase"),
            Column::auto("Done"),
            Column::auto("Next"),
        ],
        cfg.separator(),
    );
    for row in rows {
        let missing = row.derived.state.missing_stages().len();
        table.add_row(vec![
            row.staff.id,
            row.derived.phase.label().to_string(),
            format!("{} {}/5", stage_mark(missing == 0), 5 - missing),
            next_action_text(&row.derived),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
