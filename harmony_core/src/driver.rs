//! Timer orchestration around the scan state machine.
//!
//! `ScanDriver` owns the machine plus two timers: the fluctuation interval and
//! the scan-line animation frame loop. Both run only while scanning and are
//! dropped (cancelled and joined) on every exit path: completion, leaving live
//! mode, [`ScanDriver::shutdown`], and drop.

use std::time::Instant;

use harmony_traits::RandomSource;
use harmony_traits::clock::Clock;

use crate::config::ScanLineCfg;
use crate::measurement::Measurement;
use crate::scan::{ScanMachine, ScanPhase, ScanSignals, Transition};
use crate::scanline::ScanLine;
use crate::ticker::Ticker;

/// What a [`ScanDriver::pump`] call applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Interval ticks applied to the machine.
    pub ticks: usize,
    /// Animation frames applied to the scan line.
    pub frames: usize,
}

pub struct ScanDriver<R: RandomSource, C: Clock> {
    machine: ScanMachine<R>,
    line_cfg: ScanLineCfg,
    scan_line: ScanLine,
    clock: C,
    interval: Option<Ticker>,
    frames: Option<Ticker>,
    scan_started_at: Option<Instant>,
}

impl<R: RandomSource, C: Clock> ScanDriver<R, C> {
    pub fn new(machine: ScanMachine<R>, line_cfg: ScanLineCfg, clock: C) -> Self {
        Self {
            scan_line: ScanLine::new(&line_cfg),
            machine,
            line_cfg,
            clock,
            interval: None,
            frames: None,
            scan_started_at: None,
        }
    }

    pub fn machine(&self) -> &ScanMachine<R> {
        &self.machine
    }

    pub fn phase(&self) -> ScanPhase {
        self.machine.phase()
    }

    /// Feed one sample of the caller's signals, starting or cancelling timers.
    pub fn observe(&mut self, signals: ScanSignals) -> Option<Transition> {
        let transition = self.machine.observe(signals);
        match transition {
            Some(Transition::Started) => self.start_timers(),
            Some(Transition::Completed | Transition::Reset) => self.stop_timers(),
            None => {}
        }
        transition
    }

    /// Apply pending timer events on the caller's thread.
    pub fn pump(&mut self) -> PumpReport {
        let ticks = self.interval.as_ref().map_or(0, Ticker::drain);
        for _ in 0..ticks {
            self.machine.tick();
        }
        let frames = self.frames.as_ref().map_or(0, Ticker::drain);
        self.scan_line.advance(frames);
        PumpReport { ticks, frames }
    }

    pub fn display(&self) -> Vec<Measurement> {
        self.machine.display()
    }

    pub fn set_measurements(&mut self, measurements: Vec<Measurement>) {
        self.machine.set_measurements(measurements);
    }

    /// Scan-line position in percent; 0 when not scanning.
    pub fn scan_line(&self) -> f64 {
        self.scan_line.position()
    }

    pub fn timers_running(&self) -> bool {
        self.interval.is_some() || self.frames.is_some()
    }

    /// Milliseconds since the current scan started.
    pub fn scan_elapsed_ms(&self) -> Option<u64> {
        self.scan_started_at.map(|t| self.clock.ms_since(t))
    }

    /// Cancel all timers. The machine keeps its phase and display values.
    pub fn shutdown(&mut self) {
        self.stop_timers();
    }

    fn start_timers(&mut self) {
        self.stop_timers();
        self.scan_line.reset();
        self.scan_started_at = Some(self.clock.now());
        self.interval = Some(Ticker::spawn(self.machine.cfg().tick));
        self.frames = Some(Ticker::spawn(self.line_cfg.frame));
        tracing::debug!("scan timers started");
    }

    fn stop_timers(&mut self) {
        let was_running = self.timers_running();
        // Dropping a Ticker joins its thread.
        self.interval = None;
        self.frames = None;
        self.scan_started_at = None;
        self.scan_line.reset();
        if was_running {
            tracing::debug!("scan timers cancelled");
        }
    }
}

impl<R: RandomSource, C: Clock> Drop for ScanDriver<R, C> {
    fn drop(&mut self) {
        self.stop_timers();
    }
}
