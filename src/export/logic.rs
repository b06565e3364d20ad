// src/export/logic.rs

use crate::core::report::ReportLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::recorded_date_bounds;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ExportData;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportView};
use crate::models::filter::{DateRange, MachineFilter};
use crate::models::report::PeriodReport;
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use crate::utils::path::expand_tilde;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

pub struct ExportRequest<'a> {
    pub view: ExportView,
    pub format: ExportFormat,
    pub file: &'a str,
    /// `None` or `"all"` → every recorded date
    pub range: Option<&'a str>,
    pub machine: MachineFilter,
    pub force: bool,
    pub placeholder: &'a str,
}

impl ExportLogic {
    /// Build the requested view and write it.
    ///
    /// `range` accepts the same expressions as the report commands:
    ///   - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
    ///   - `YYYY:YYYY`, `YYYY-MM:YYYY-MM`, `YYYY-MM-DD:YYYY-MM-DD`
    pub fn export(pool: &mut DbPool, req: &ExportRequest<'_>) -> AppResult<()> {
        let expanded = expand_tilde(req.file);
        let path = Path::new(&expanded);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {}",
                req.file
            )));
        }

        // Validate the range before touching the file system.
        let range = match req.range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        ensure_writable(path, req.force)?;

        let data = Self::build(pool, req.view, range, &req.machine, req.placeholder)?;

        if data.is_empty() {
            warning("No rows match the selection, writing an empty export.");
        }

        match req.format {
            ExportFormat::Csv => export_csv(&data, path)?,
            ExportFormat::Json => export_json(&data, path)?,
            ExportFormat::Xlsx => export_xlsx(&data, req.view.as_str(), path)?,
        }

        let tx = pool.write_tx()?;
        ttlog(
            &tx,
            "export",
            &path.to_string_lossy(),
            &format!(
                "{} exported as {} ({} rows)",
                req.view.as_str(),
                req.format.as_str(),
                data.rows.len()
            ),
        )?;
        tx.commit()?;

        Ok(())
    }

    /// Collect the rows of a view. Without a range every recorded date is
    /// covered; an empty store yields an empty dataset.
    pub fn build(
        pool: &DbPool,
        view: ExportView,
        range: Option<DateRange>,
        machine: &MachineFilter,
        placeholder: &str,
    ) -> AppResult<ExportData> {
        let range = match range {
            Some(r) => Some(r),
            None => match recorded_date_bounds(&pool.conn)? {
                Some((first, last)) => Some(DateRange::new(first, last)?),
                None => None,
            },
        };

        match (view, range) {
            (ExportView::History, Some(r)) => ExportData::from_history(
                &ReportLogic::records_in_range(pool, &r, machine)?,
                placeholder,
            ),
            (ExportView::History, None) => ExportData::from_history(&[], placeholder),
            (ExportView::Report, Some(r)) => {
                ExportData::from_period_report(&ReportLogic::period_report(pool, &r, machine)?)
            }
            (ExportView::Report, None) => ExportData::from_period_report(&PeriodReport::empty()),
            (ExportView::Breakdown, Some(r)) => {
                ExportData::from_breakdown(&ReportLogic::downtime_breakdown(pool, &r, machine)?)
            }
            (ExportView::Breakdown, None) => ExportData::from_breakdown(&[]),
        }
    }
}
