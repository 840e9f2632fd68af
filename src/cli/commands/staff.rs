use crate::cli::parser::StaffAction;
use crate::config::Config;
use crate::core::roster::register;
use crate::db::staff::list_staff;
use crate::errors::AppResult;
use crate::models::staff::Role;
use crate::ui::messages::{success, warning};
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(action: &StaffAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        StaffAction::Add { id, name, manager } => {
            let role = if *manager { Role::Manager } else { Role::Staff };
            let member = register(&mut pool, id, name, role)?;
            success(format!(
                "Staff member '{}' ({}) registered as {}",
                member.id,
                member.name,
                role.to_db_str()
            ));
        }
        StaffAction::List => {
            let members = list_staff(&pool.conn)?;
            if members.is_empty() {
                warning("No staff members registered.");
                return Ok(());
            }

            let mut table = Table::new(
                vec![Column::auto("ID"), Column::auto("Name"), Column::auto("Role")],
                cfg.separator(),
            );
            for m in members {
                table.add_row(vec![m.id, m.name, m.role.to_db_str().to_string()]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
