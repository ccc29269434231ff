//! Runtime configuration for the scan core.
//!
//! These are separate from the TOML-deserialized config in `harmony_config`;
//! see `conversions` for the mapping.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{HarmonyError, Result};

fn invalid(msg: &str) -> eyre::Report {
    eyre::Report::new(HarmonyError::Config(msg.to_string()))
}

/// Scan simulation parameters.
#[derive(Debug, Clone)]
pub struct ScanCfg {
    /// Fluctuation interval while scanning.
    pub tick: Duration,
    /// Per-tick display factor range `[min, max]`.
    pub fluctuation: (f64, f64),
    /// Accuracy factor with no completed scans.
    pub accuracy_base: f64,
    /// Accuracy gained per completed scan.
    pub accuracy_step: f64,
    /// Cap applied before jitter.
    pub accuracy_ceiling: f64,
    /// Jitter upper bound, drawn from `[0, accuracy_jitter]`.
    pub accuracy_jitter: f64,
    pub confidence_step: f64,
    pub confidence_ceiling: f64,
    pub seed: Option<u64>,
}

impl Default for ScanCfg {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            fluctuation: (0.70, 0.95),
            accuracy_base: 0.85,
            accuracy_step: 0.03,
            accuracy_ceiling: 0.98,
            accuracy_jitter: 0.05,
            confidence_step: 0.02,
            confidence_ceiling: 0.99,
            seed: None,
        }
    }
}

impl ScanCfg {
    /// Accuracy factor before jitter for the given number of completed scans.
    pub fn accuracy_floor(&self, scan_count: u32) -> f64 {
        (self.accuracy_base + self.accuracy_step * f64::from(scan_count)).min(self.accuracy_ceiling)
    }

    /// Reject parameters the scan machine cannot sample from.
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.fluctuation;
        if self.tick.is_zero() {
            return Err(invalid("tick must be > 0"));
        }
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(invalid("fluctuation must be finite with 0 < min <= max"));
        }
        let finite = [
            self.accuracy_base,
            self.accuracy_step,
            self.accuracy_ceiling,
            self.accuracy_jitter,
            self.confidence_step,
        ];
        if finite.iter().any(|x| !x.is_finite() || *x < 0.0) {
            return Err(invalid("accuracy and confidence parameters must be finite and >= 0"));
        }
        if self.accuracy_ceiling < self.accuracy_base {
            return Err(invalid("accuracy_ceiling must be >= accuracy_base"));
        }
        if !(self.confidence_ceiling > 0.0 && self.confidence_ceiling <= 1.0) {
            return Err(invalid("confidence_ceiling must be in (0.0, 1.0]"));
        }
        Ok(())
    }

    /// Confidence multiplier for the given number of completed scans.
    pub fn confidence_gain(&self, scan_count: u32) -> f64 {
        1.0 + self.confidence_step * f64::from(scan_count)
    }
}

/// Decorative scan-line animation.
#[derive(Debug, Clone)]
pub struct ScanLineCfg {
    pub frame: Duration,
    pub step_percent: f64,
}

impl Default for ScanLineCfg {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(16),
            step_percent: 0.5,
        }
    }
}

/// Capture session parameters.
#[derive(Debug, Clone)]
pub struct CaptureCfg {
    pub width: u32,
    pub height: u32,
    pub session: Duration,
    pub progress_tick: Duration,
}

impl Default for CaptureCfg {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            session: Duration::from_secs(7 * 60),
            progress_tick: Duration::from_secs(1),
        }
    }
}

/// History persistence.
#[derive(Debug, Clone)]
pub struct HistoryCfg {
    pub storage_key: String,
    pub dir: Option<PathBuf>,
    pub days: u32,
}

impl Default for HistoryCfg {
    fn default() -> Self {
        Self {
            storage_key: "harmony-measurement-history".to_string(),
            dir: None,
            days: 7,
        }
    }
}

/// CSV export destinations.
#[derive(Debug, Clone)]
pub struct ExportCfg {
    pub dir: PathBuf,
    pub live_prefix: String,
    pub history_prefix: String,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            live_prefix: "harmony-measurements".to_string(),
            history_prefix: "harmony-measurement-history".to_string(),
        }
    }
}
