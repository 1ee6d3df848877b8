// src/export/logic.rs

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{VisitFilter, load_visits};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::VisitExport;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export store visits.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period expression (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or two of the same form joined by `:`)
    /// - `with_photos`: include the base64 photo (CSV / JSON only)
    ///
    /// Returns the number of exported visits.
    pub fn export(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        range: &Option<String>,
        with_photos: bool,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let visits = load_visits(
            pool,
            &VisitFilter {
                bounds,
                ..Default::default()
            },
        )?;

        if visits.is_empty() {
            warning("No store visits found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        if with_photos && matches!(format, ExportFormat::Xlsx) {
            warning("Photos are not written to XLSX; use csv or json for --with-photos.");
        }

        let rows: Vec<VisitExport> = visits
            .into_iter()
            .map(|v| VisitExport::from_visit(v, with_photos))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} visit(s) exported as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}
