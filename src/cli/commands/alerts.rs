use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::alerts::list_alerts;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let alerts = list_alerts(&pool.conn, cli.staff.as_deref())?;

    if alerts.is_empty() {
        success("No alerts.");
        return Ok(());
    }

    let mut table = Table::new(
        vec![
            Column::auto("ID"),
            Column::auto("Staff"),
            Column::auto("Date"),
            Column::auto("Kind"),
            Column::auto("Message"),
        ],
        cfg.separator(),
    );
    for a in alerts {
        table.add_row(vec![
            a.id.to_string(),
            a.staff_id,
            a.date.to_string(),
            a.kind,
            a.message,
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
