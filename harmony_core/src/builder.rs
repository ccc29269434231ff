//! Construction of the runtime pieces from a loaded [`harmony_config::Config`].
//!
//! Validation happens once in [`Setup::from_config`]; everything built from a
//! `Setup` can assume sane parameters.

use chrono::{DateTime, Utc};
use eyre::WrapErr;
use harmony_traits::clock::Clock;

use crate::config::{CaptureCfg, ExportCfg, HistoryCfg, ScanCfg, ScanLineCfg};
use crate::driver::ScanDriver;
use crate::error::{HarmonyError, Result};
use crate::history::HistoryStore;
use crate::measurement::{Measurement, generate_history};
use crate::progress::ProgressTimer;
use crate::random::SeededRandom;
use crate::scan::ScanMachine;
use crate::store::FileStore;

/// Validated runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Setup {
    pub scan: ScanCfg,
    pub scanline: ScanLineCfg,
    pub capture: CaptureCfg,
    pub history: HistoryCfg,
    pub export: ExportCfg,
}

impl Setup {
    pub fn from_config(cfg: &harmony_config::Config) -> Result<Self> {
        cfg.validate()
            .map_err(|e| HarmonyError::Config(e.to_string()))
            .wrap_err("invalid configuration")?;
        let setup = Self {
            scan: ScanCfg::from(&cfg.scan),
            scanline: ScanLineCfg::from(&cfg.scanline),
            capture: CaptureCfg::from(&cfg.capture),
            history: HistoryCfg::from(&cfg.history),
            export: ExportCfg::from(&cfg.export),
        };
        setup.scan.validate()?;
        tracing::debug!(seeded = setup.scan.seed.is_some(), "setup built from config");
        Ok(setup)
    }

    /// Random source for one consumer. With `scan.seed` set, every call
    /// returns a source producing the same sequence.
    pub fn random(&self) -> SeededRandom {
        SeededRandom::from_seed(self.scan.seed)
    }

    pub fn scan_machine(&self, measurements: Vec<Measurement>) -> ScanMachine<SeededRandom> {
        ScanMachine::new(measurements, self.scan.clone(), self.random())
    }

    pub fn scan_driver<C: Clock>(
        &self,
        measurements: Vec<Measurement>,
        clock: C,
    ) -> ScanDriver<SeededRandom, C> {
        ScanDriver::new(self.scan_machine(measurements), self.scanline.clone(), clock)
    }

    /// `history.days` of fabricated history ending at `today`.
    pub fn demo_history(&self, base: &[Measurement], today: DateTime<Utc>) -> Vec<Measurement> {
        generate_history(base, self.history.days, today, &mut self.random())
    }

    /// File-backed history when `history.dir` is configured.
    pub fn history_store(&self) -> Option<HistoryStore<FileStore>> {
        HistoryStore::open(&self.history)
    }

    pub fn progress_timer(&self) -> ProgressTimer {
        ProgressTimer::new(&self.capture)
    }

    /// Simulated camera at the configured ideal frame size.
    #[cfg(feature = "media-errors")]
    pub fn camera(&self) -> harmony_media::SimulatedCamera {
        harmony_media::SimulatedCamera::new(self.capture.width, self.capture.height)
    }
}

impl<C: Clock> ScanDriver<SeededRandom, C> {
    /// Validate `cfg` and build a driver seeded from `scan.seed`.
    pub fn from_config(
        cfg: &harmony_config::Config,
        measurements: Vec<Measurement>,
        clock: C,
    ) -> Result<Self> {
        Ok(Setup::from_config(cfg)?.scan_driver(measurements, clock))
    }
}
