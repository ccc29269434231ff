//! Scan session state machine.
//!
//! Drives the "scanning" display from two caller-sampled signals:
//!
//! - `live_mode`: false when the caller shows history; forces `Idle` and resets the session.
//! - `zero_signal`: true while a scan is running.
//!
//! ```text
//!   Idle ──zero──▶ Scanning ──!zero──▶ Completed
//!    ▲               ▲ │ tick             │
//!    │               │ └──────┘           │
//!    │               └────────zero────────┘
//!    └──────────── !live (from any state)
//! ```
//!
//! The machine never mutates the original measurements; it keeps per-id
//! overrides and derives display copies on demand.

use std::collections::HashMap;

use harmony_traits::RandomSource;
use serde::Serialize;

use crate::config::ScanCfg;
use crate::measurement::Measurement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning,
    Completed,
}

/// Ephemeral session bookkeeping. Reset when the caller leaves live mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanSession {
    pub started: bool,
    pub completed: bool,
    /// Completed scans in this session.
    pub scan_count: u32,
}

/// Caller-supplied inputs, sampled once per update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSignals {
    pub live_mode: bool,
    pub zero_signal: bool,
}

impl ScanSignals {
    pub fn live(zero_signal: bool) -> Self {
        Self {
            live_mode: true,
            zero_signal,
        }
    }

    pub fn history() -> Self {
        Self {
            live_mode: false,
            zero_signal: false,
        }
    }
}

/// Transition taken by [`ScanMachine::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Entered `Scanning`; display values zeroed.
    Started,
    /// Entered `Completed`; display values frozen.
    Completed,
    /// Left live mode; back to `Idle` with a fresh session.
    Reset,
}

#[derive(Debug, Clone, Copy)]
struct Derived {
    value: f64,
    confidence: f64,
}

pub struct ScanMachine<R: RandomSource> {
    cfg: ScanCfg,
    rng: R,
    phase: ScanPhase,
    session: ScanSession,
    originals: Vec<Measurement>,
    derived: HashMap<String, Derived>,
}

impl<R: RandomSource> core::fmt::Debug for ScanMachine<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScanMachine")
            .field("phase", &self.phase)
            .field("session", &self.session)
            .field("measurements", &self.originals.len())
            .finish()
    }
}

impl<R: RandomSource> ScanMachine<R> {
    pub fn new(measurements: Vec<Measurement>, cfg: ScanCfg, rng: R) -> Self {
        Self {
            cfg,
            rng,
            phase: ScanPhase::Idle,
            session: ScanSession::default(),
            originals: measurements,
            derived: HashMap::new(),
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn session(&self) -> ScanSession {
        self.session
    }

    pub fn cfg(&self) -> &ScanCfg {
        &self.cfg
    }

    /// The measurements as supplied by the detector.
    pub fn originals(&self) -> &[Measurement] {
        &self.originals
    }

    /// Apply one sample of the caller's signals.
    pub fn observe(&mut self, signals: ScanSignals) -> Option<Transition> {
        if !signals.live_mode {
            if self.phase == ScanPhase::Idle && self.session == ScanSession::default() {
                return None;
            }
            self.reset();
            return Some(Transition::Reset);
        }
        match (self.phase, signals.zero_signal) {
            (ScanPhase::Idle | ScanPhase::Completed, true) => {
                self.start();
                Some(Transition::Started)
            }
            (ScanPhase::Scanning, false) => {
                self.complete();
                Some(Transition::Completed)
            }
            _ => None,
        }
    }

    /// Interval self-loop. Redraws every scanned value as `original * f`,
    /// `f` uniform in the fluctuation range. No-op outside `Scanning`.
    pub fn tick(&mut self) -> bool {
        if self.phase != ScanPhase::Scanning {
            return false;
        }
        let (lo, hi) = self.cfg.fluctuation;
        for m in &self.originals {
            if let Some(d) = self.derived.get_mut(&m.id) {
                d.value = m.value * self.rng.uniform(lo, hi);
            }
        }
        true
    }

    /// Replace the detector output, possibly with a different shape.
    ///
    /// Overrides for ids that disappeared are discarded; new ids pass
    /// through unmodified until the next scan starts.
    pub fn set_measurements(&mut self, measurements: Vec<Measurement>) {
        self.derived
            .retain(|id, _| measurements.iter().any(|m| &m.id == id));
        self.originals = measurements;
    }

    /// Measurements as they should be displayed in the current phase.
    pub fn display(&self) -> Vec<Measurement> {
        if self.phase == ScanPhase::Idle {
            return self.originals.clone();
        }
        self.originals
            .iter()
            .map(|m| match self.derived.get(&m.id) {
                Some(d) => m.derive(d.value, d.confidence),
                None => m.clone(),
            })
            .collect()
    }

    fn start(&mut self) {
        self.derived = self
            .originals
            .iter()
            .map(|m| {
                (
                    m.id.clone(),
                    Derived {
                        value: 0.0,
                        confidence: m.confidence,
                    },
                )
            })
            .collect();
        self.phase = ScanPhase::Scanning;
        self.session.started = true;
        self.session.completed = false;
        tracing::debug!(
            scan_count = self.session.scan_count,
            measurements = self.derived.len(),
            "scan started"
        );
    }

    fn complete(&mut self) {
        let count = self.session.scan_count;
        let floor = self.cfg.accuracy_floor(count);
        let gain = self.cfg.confidence_gain(count);
        for m in &self.originals {
            if let Some(d) = self.derived.get_mut(&m.id) {
                let accuracy = floor + self.rng.uniform(0.0, self.cfg.accuracy_jitter);
                d.value = m.value * accuracy;
                d.confidence = (m.confidence * gain).min(self.cfg.confidence_ceiling);
            }
        }
        self.phase = ScanPhase::Completed;
        self.session.completed = true;
        self.session.scan_count = count.saturating_add(1);
        tracing::debug!(
            scan_count = self.session.scan_count,
            accuracy_floor = floor,
            "scan completed"
        );
    }

    fn reset(&mut self) {
        tracing::debug!(from = ?self.phase, "scan session reset");
        self.derived.clear();
        self.phase = ScanPhase::Idle;
        self.session = ScanSession::default();
    }
}
