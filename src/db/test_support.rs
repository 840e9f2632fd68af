//! Shared fixtures for database-backed unit tests.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::staff::insert_staff;
use crate::models::staff::Role;
use chrono::{NaiveDate, NaiveTime};

/// In-memory database with the full schema and two registered staff members.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::new(":memory:").expect("open in-memory db");
    init_db(&pool.conn).expect("init schema");
    insert_staff(&pool.conn, "alice", "Alice", Role::Staff).expect("insert alice");
    insert_staff(&pool.conn, "bob", "Bob", Role::Manager).expect("insert bob");
    pool
}

/// A day of October 2025.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).expect("valid day")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}
