use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

use super::open_pool;

/// Exports every staff member unless `--staff` narrows it down.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = &cli.command
    {
        let pool = open_pool(cfg)?;
        ExportLogic::export(
            &pool,
            *format,
            file,
            range.as_deref(),
            cli.staff.as_deref(),
            *force,
        )?;
    }
    Ok(())
}
