use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command: config directory, config file (unless
/// `--test`), database file and all pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing staffcheck…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_str);

    let pool = DbPool::new(&db_str)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", db_str);

    // non-blocking
    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", db_str),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 staffcheck initialization completed!");
    Ok(())
}
