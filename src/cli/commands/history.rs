use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::attendance::list_records;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use crate::utils::time::fmt_opt_time;
use crate::utils::table::{Column, Table};

use super::{open_pool, resolve_staff};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::History { period } = &cli.command {
        let bounds = match period {
            Some(p) => parse_period(p)?,
            None => None,
        };
        let staff_id = resolve_staff(cli, cfg)?;
        let pool = open_pool(cfg)?;

        let records = list_records(&pool.conn, Some(staff_id.as_str()), bounds)?;
        if records.is_empty() {
            warning(format!("No attendance records for {staff_id}."));
            return Ok(());
        }

        let mut table = Table::new(
            vec![
                Column::auto("ID"),
                Column::auto("Date"),
                Column::auto("Status"),
                Column::auto("Wake-up"),
                Column::auto("Departure"),
                Column::auto("Arrival"),
                Column::auto("Location"),
            ],
            cfg.separator(),
        );
        for r in &records {
            table.add_row(vec![
                r.id.to_string(),
                r.date_str(),
                r.status.to_db_str().to_string(),
                fmt_opt_time(r.wake_up_time),
                fmt_opt_time(r.departure_time),
                fmt_opt_time(r.arrival_time),
                r.arrival_location.clone().unwrap_or_else(|| "-".into()),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
