//! `From` implementations bridging `harmony_config` types to `harmony_core` types.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CaptureCfg, ExportCfg, HistoryCfg, ScanCfg, ScanLineCfg};
use crate::measurement::Measurement;

// ── ScanCfg ──────────────────────────────────────────────────────────────────

impl From<&harmony_config::ScanCfg> for ScanCfg {
    fn from(c: &harmony_config::ScanCfg) -> Self {
        Self {
            tick: Duration::from_millis(c.tick_ms),
            fluctuation: (c.fluctuation_min, c.fluctuation_max),
            accuracy_base: c.accuracy_base,
            accuracy_step: c.accuracy_step,
            accuracy_ceiling: c.accuracy_ceiling,
            accuracy_jitter: c.accuracy_jitter,
            confidence_step: c.confidence_step,
            confidence_ceiling: c.confidence_ceiling,
            seed: c.seed,
        }
    }
}

// ── ScanLineCfg ──────────────────────────────────────────────────────────────

impl From<&harmony_config::ScanLineCfg> for ScanLineCfg {
    fn from(c: &harmony_config::ScanLineCfg) -> Self {
        Self {
            frame: Duration::from_millis(c.frame_ms),
            step_percent: c.step_percent,
        }
    }
}

// ── CaptureCfg ───────────────────────────────────────────────────────────────

impl From<&harmony_config::CaptureCfg> for CaptureCfg {
    fn from(c: &harmony_config::CaptureCfg) -> Self {
        Self {
            width: c.width,
            height: c.height,
            session: Duration::from_secs(c.session_secs),
            progress_tick: Duration::from_millis(c.progress_tick_ms),
        }
    }
}

// ── HistoryCfg / ExportCfg ───────────────────────────────────────────────────

impl From<&harmony_config::HistoryCfg> for HistoryCfg {
    fn from(c: &harmony_config::HistoryCfg) -> Self {
        Self {
            storage_key: c.storage_key.clone(),
            dir: c.dir.as_ref().map(PathBuf::from),
            days: c.days,
        }
    }
}

impl From<&harmony_config::ExportCfg> for ExportCfg {
    fn from(c: &harmony_config::ExportCfg) -> Self {
        Self {
            dir: PathBuf::from(&c.dir),
            live_prefix: c.live_prefix.clone(),
            history_prefix: c.history_prefix.clone(),
        }
    }
}

// ── Measurement fixtures ─────────────────────────────────────────────────────

impl From<&harmony_config::MeasurementRow> for Measurement {
    fn from(r: &harmony_config::MeasurementRow) -> Self {
        Measurement::new(r.id.clone(), r.name.clone(), r.value, r.unit.clone(), r.confidence)
    }
}

impl From<harmony_config::MeasurementRow> for Measurement {
    fn from(r: harmony_config::MeasurementRow) -> Self {
        Measurement::new(r.id, r.name, r.value, r.unit, r.confidence)
    }
}
