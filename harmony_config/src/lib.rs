#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and measurement fixture parsing for Harmony.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//!   Every section is optional; an empty document yields the demo defaults.
//! - The measurement CSV loader enforces headers and rejects rows that could
//!   never be displayed (confidence outside [0, 1], empty unit, duplicate id).
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// Measurement fixture CSV schema.
///
/// Expected headers:
/// id,name,value,unit,confidence
///
/// Example:
/// id,name,value,unit,confidence
/// 1,Shoulder Width,45.2,cm,0.92
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MeasurementRow {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub confidence: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanCfg {
    /// Interval between fluctuation ticks while scanning (ms).
    pub tick_ms: u64,
    /// Lower bound of the per-tick display factor.
    pub fluctuation_min: f64,
    /// Upper bound of the per-tick display factor.
    pub fluctuation_max: f64,
    /// Accuracy factor before any completed scans.
    pub accuracy_base: f64,
    /// Accuracy gained per completed scan.
    pub accuracy_step: f64,
    /// Cap on the accuracy factor before jitter is added.
    pub accuracy_ceiling: f64,
    /// Upper bound of the uniform jitter added to the accuracy factor.
    pub accuracy_jitter: f64,
    /// Relative confidence gain per completed scan.
    pub confidence_step: f64,
    pub confidence_ceiling: f64,
    /// Optional RNG seed; absent means entropy-seeded.
    pub seed: Option<u64>,
}

impl Default for ScanCfg {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            fluctuation_min: 0.70,
            fluctuation_max: 0.95,
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

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanLineCfg {
    /// Animation frame period (ms).
    pub frame_ms: u64,
    /// Percent of the frame height advanced per animation frame.
    pub step_percent: f64,
}

impl Default for ScanLineCfg {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            step_percent: 0.5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CaptureCfg {
    /// Ideal capture width in pixels.
    pub width: u32,
    /// Ideal capture height in pixels.
    pub height: u32,
    /// Length of a full capture session (s).
    pub session_secs: u64,
    /// Progress update interval (ms).
    pub progress_tick_ms: u64,
}

impl Default for CaptureCfg {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            session_secs: 7 * 60,
            progress_tick_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryCfg {
    /// Key under which the JSON history array is stored.
    pub storage_key: String,
    /// Directory for the file-backed store; absent keeps history in memory.
    pub dir: Option<String>,
    /// Days of demo history to generate.
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

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportCfg {
    pub dir: String,
    /// File name prefix for live measurement exports.
    pub live_prefix: String,
    /// File name prefix for history exports.
    pub history_prefix: String,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            live_prefix: "harmony-measurements".to_string(),
            history_prefix: "harmony-measurement-history".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
    /// Emit JSON lines instead of pretty text
    pub json: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scan: ScanCfg,
    pub scanline: ScanLineCfg,
    pub capture: CaptureCfg,
    pub history: HistoryCfg,
    pub export: ExportCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const ROTATIONS: [&str; 3] = ["never", "daily", "hourly"];

fn unit_interval(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Scan
        let s = &self.scan;
        if s.tick_ms == 0 {
            eyre::bail!("scan.tick_ms must be >= 1");
        }
        if !(s.fluctuation_min > 0.0 && s.fluctuation_min <= 1.0) {
            eyre::bail!("scan.fluctuation_min must be in (0.0, 1.0]");
        }
        if !(s.fluctuation_max > 0.0 && s.fluctuation_max <= 1.0) {
            eyre::bail!("scan.fluctuation_max must be in (0.0, 1.0]");
        }
        if s.fluctuation_min > s.fluctuation_max {
            eyre::bail!("scan.fluctuation_min must be <= scan.fluctuation_max");
        }
        if !unit_interval(s.accuracy_base) {
            eyre::bail!("scan.accuracy_base must be in [0.0, 1.0]");
        }
        if !(s.accuracy_step >= 0.0 && s.accuracy_step <= 1.0) {
            eyre::bail!("scan.accuracy_step must be in [0.0, 1.0]");
        }
        if !unit_interval(s.accuracy_ceiling) || s.accuracy_ceiling < s.accuracy_base {
            eyre::bail!("scan.accuracy_ceiling must be in [scan.accuracy_base, 1.0]");
        }
        if !unit_interval(s.accuracy_jitter) {
            eyre::bail!("scan.accuracy_jitter must be in [0.0, 1.0]");
        }
        if !(s.confidence_step >= 0.0 && s.confidence_step <= 1.0) {
            eyre::bail!("scan.confidence_step must be in [0.0, 1.0]");
        }
        if !(s.confidence_ceiling > 0.0 && s.confidence_ceiling <= 1.0) {
            eyre::bail!("scan.confidence_ceiling must be in (0.0, 1.0]");
        }

        // Scan line
        if self.scanline.frame_ms == 0 {
            eyre::bail!("scanline.frame_ms must be >= 1");
        }
        if !(self.scanline.step_percent > 0.0 && self.scanline.step_percent <= 100.0) {
            eyre::bail!("scanline.step_percent must be in (0.0, 100.0]");
        }

        // Capture
        if self.capture.width == 0 || self.capture.height == 0 {
            eyre::bail!("capture.width and capture.height must be > 0");
        }
        if self.capture.session_secs == 0 {
            eyre::bail!("capture.session_secs must be >= 1");
        }
        if self.capture.session_secs > 24 * 60 * 60 {
            eyre::bail!("capture.session_secs is unreasonably large (>24h)");
        }
        if self.capture.progress_tick_ms == 0 {
            eyre::bail!("capture.progress_tick_ms must be >= 1");
        }

        // History
        if self.history.storage_key.trim().is_empty() {
            eyre::bail!("history.storage_key must not be empty");
        }
        if self.history.days == 0 || self.history.days > 366 {
            eyre::bail!("history.days must be in [1, 366]");
        }

        // Export
        if self.export.live_prefix.trim().is_empty() || self.export.history_prefix.trim().is_empty()
        {
            eyre::bail!("export prefixes must not be empty");
        }

        // Logging
        if let Some(level) = self.logging.level.as_deref()
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.level must be one of {}", LOG_LEVELS.join("|"));
        }
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !ROTATIONS.contains(&rotation.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.rotation must be one of {}", ROTATIONS.join("|"));
        }

        Ok(())
    }
}

/// Load a measurement fixture CSV from disk.
pub fn load_measurements_csv(path: &std::path::Path) -> eyre::Result<Vec<MeasurementRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open measurements CSV {:?}: {}", path, e))?;
    read_measurements_csv(file)
}

/// Parse a measurement fixture CSV from any reader.
pub fn read_measurements_csv<R: Read>(reader: R) -> eyre::Result<Vec<MeasurementRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers: {}", e))?
        .clone();
    let expected = ["id", "name", "value", "unit", "confidence"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "measurements CSV must have headers 'id,name,value,unit,confidence', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for (idx, rec) in rdr.deserialize::<MeasurementRow>().enumerate() {
        let line = idx + 2;
        let row = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", line, e))?;
        if !row.value.is_finite() {
            eyre::bail!("row {}: value must be finite", line);
        }
        if !unit_interval(row.confidence) {
            eyre::bail!("row {}: confidence must be in [0.0, 1.0]", line);
        }
        if row.unit.is_empty() {
            eyre::bail!("row {}: unit must not be empty", line);
        }
        if !seen.insert(row.id.clone()) {
            eyre::bail!("row {}: duplicate id {:?}", line, row.id);
        }
        rows.push(row);
    }
    Ok(rows)
}
