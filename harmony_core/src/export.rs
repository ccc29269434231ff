//! CSV export to dated files.

use std::path::PathBuf;

use chrono::NaiveDate;
use eyre::WrapErr;

use crate::atomic::write_atomic;
use crate::config::ExportCfg;
use crate::error::{HarmonyError, Result};
use crate::formatter::{CsvLayout, to_csv};
use crate::measurement::Measurement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The measurements currently on screen.
    Live,
    /// The full stored history.
    History,
}

impl ExportKind {
    pub fn layout(self) -> CsvLayout {
        match self {
            ExportKind::Live => CsvLayout::Live,
            ExportKind::History => CsvLayout::Historical,
        }
    }
}

/// `<prefix>-YYYY-MM-DD.csv`
pub fn export_file_name(cfg: &ExportCfg, kind: ExportKind, date: NaiveDate) -> String {
    let prefix = match kind {
        ExportKind::Live => &cfg.live_prefix,
        ExportKind::History => &cfg.history_prefix,
    };
    format!("{prefix}-{}.csv", date.format("%Y-%m-%d"))
}

/// Render and write an export, returning the file path.
pub fn write_csv(
    cfg: &ExportCfg,
    kind: ExportKind,
    measurements: &[Measurement],
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = cfg.dir.join(export_file_name(cfg, kind, date));
    let body = to_csv(measurements, kind.layout());
    write_atomic(&path, body.as_bytes())
        .map_err(|e| HarmonyError::Io(e.to_string()))
        .wrap_err_with(|| format!("write export {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = measurements.len(), "csv export written");
    Ok(path)
}
