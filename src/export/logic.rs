// src/export/logic.rs

use crate::db::attendance::list_records;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export attendance records to `file` (absolute path).
    ///
    /// `range` accepts the `history --period` syntax; `None` or `all`
    /// exports everything. Returns the number of exported rows.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        staff_id: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) => parse_period(r)?,
        };

        let rows: Vec<AttendanceExport> = list_records(&pool.conn, staff_id, bounds)?
            .iter()
            .map(AttendanceExport::from)
            .collect();

        if rows.is_empty() {
            warning("No attendance records found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::attendance::upsert_attendance_stage;
    use crate::db::test_support::{day, memory_pool, t};
    use crate::models::attendance::StagePayload;
    use crate::models::stage::Stage;

    #[test]
    fn relative_paths_are_refused() {
        let pool = memory_pool();
        let err =
            ExportLogic::export(&pool, ExportFormat::Csv, "out.csv", None, None, true).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn json_export_writes_records_in_range() {
        let pool = memory_pool();
        for d in [13, 14] {
            upsert_attendance_stage(
                &pool.conn,
                "alice",
                &day(d),
                Stage::WakeUp,
                &StagePayload::at(t("06:30")),
                None,
            )
            .unwrap();
        }

        let path = std::env::temp_dir().join(format!("staffcheck_export_{}.json", std::process::id()));
        let n = ExportLogic::export(
            &pool,
            ExportFormat::Json,
            path.to_str().unwrap(),
            Some("2025-10-14"),
            None,
            true,
        )
        .unwrap();
        assert_eq!(n, 1);

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["date"], "2025-10-14");
        assert_eq!(parsed[0]["wake_up"], "06:30");
        std::fs::remove_file(&path).ok();
    }
}
