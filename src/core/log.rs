use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const OP_MAX_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));
    re.replace_all(s, "").into_owned()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "plan" | "link" => Colour::Cyan,
        "wakeup" | "departure" | "arrival" | "report" => Colour::Green,
        "complete" => Colour::Blue,
        "new_day" => Colour::Yellow,
        "shift_add" | "shift_approve" => Colour::RGB(255, 153, 51),
        "staff_add" | "init" => Colour::White,
        "migration_applied" => Colour::Purple,
        "vacuum" => Colour::Red,
        _ => Colour::White,
    }
}

/// Render log rows as aligned lines; only the operation word is coloured.
pub fn format_log_lines(entries: &[LogEntry]) -> Vec<String> {
    let op_targets: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            }
        })
        .collect();

    let op_w = op_targets
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(10)
        .min(OP_MAX_WIDTH);
    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    let dates: Vec<String> = entries
        .iter()
        .map(|e| {
            chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone())
        })
        .collect();
    let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(entries.len());
    for ((entry, op_target), date) in entries.iter().zip(op_targets).zip(dates) {
        let color = color_for_operation(&entry.operation);

        let visible = if op_target.chars().count() > OP_MAX_WIDTH {
            let mut s: String = op_target.chars().take(OP_MAX_WIDTH - 3).collect();
            s.push_str("...");
            s
        } else {
            op_target
        };

        let colored = match visible.split_once(' ') {
            Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
            None => color.paint(visible.as_str()).to_string(),
        };

        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

        lines.push(format!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            entry.id, date, colored, padding, entry.message
        ));
    }
    lines
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        println!("📜 Access log:\n");
        for line in format_log_lines(&entries) {
            println!("{line}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, op: &str, target: &str) -> LogEntry {
        LogEntry {
            id,
            date: "2025-10-14T08:00:00+02:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn lines_are_aligned_without_ansi() {
        let lines = format_log_lines(&[
            entry(1, "migration_applied", ""),
            entry(12, "wakeup", "alice"),
        ]);

        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();
        assert_eq!(plain[0].find("=>"), plain[1].find("=>"));
        assert!(plain[1].contains("wakeup (alice)"));
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(80);
        let lines = format_log_lines(&[entry(1, "plan", &long)]);
        assert!(strip_ansi(&lines[0]).contains("..."));
    }
}
