//! Capture session progress bar.

use std::time::Duration;

use crate::config::CaptureCfg;
use crate::ticker::Ticker;

/// Progress through a fixed-length capture session, advanced once per progress tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureProgress {
    percent: f64,
    increment: f64,
}

impl CaptureProgress {
    /// `session` long, with one update every `tick`.
    pub fn new(session: Duration, tick: Duration) -> Self {
        let ticks = (session.as_secs_f64() / tick.as_secs_f64().max(f64::EPSILON)).max(1.0);
        Self {
            percent: 0.0,
            increment: 100.0 / ticks,
        }
    }

    pub fn from_cfg(cfg: &CaptureCfg) -> Self {
        Self::new(cfg.session, cfg.progress_tick)
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Rounded percentage for display.
    pub fn display_percent(&self) -> u32 {
        self.percent.round() as u32
    }

    pub fn is_finished(&self) -> bool {
        self.percent >= 100.0
    }

    /// Apply one tick. Returns true once the session is finished.
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.percent += self.increment;
            // accumulated increments may fall a hair short of 100
            if self.percent >= 100.0 - 1e-9 {
                self.percent = 100.0;
            }
        }
        self.is_finished()
    }
}

/// [`CaptureProgress`] advanced by a background [`Ticker`] every `progress_tick`.
///
/// Like the scan driver, the ticker only emits events; [`ProgressTimer::pump`]
/// applies them on the caller's thread. The ticker is dropped once the
/// session finishes, on [`ProgressTimer::stop`], and on drop.
pub struct ProgressTimer {
    progress: CaptureProgress,
    tick: Duration,
    ticker: Option<Ticker>,
}

impl core::fmt::Debug for ProgressTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressTimer")
            .field("percent", &self.progress.percent)
            .field("running", &self.ticker.is_some())
            .finish()
    }
}

impl ProgressTimer {
    pub fn new(cfg: &CaptureCfg) -> Self {
        Self {
            progress: CaptureProgress::from_cfg(cfg),
            tick: cfg.progress_tick,
            ticker: None,
        }
    }

    /// Restart the session from 0 %.
    pub fn start(&mut self) {
        self.ticker = None;
        self.progress = CaptureProgress {
            percent: 0.0,
            ..self.progress
        };
        self.ticker = Some(Ticker::spawn(self.tick));
        tracing::debug!("capture progress started");
    }

    /// Apply pending ticks. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let ticks = self.ticker.as_ref().map_or(0, Ticker::drain);
        for _ in 0..ticks {
            if self.progress.advance() {
                break;
            }
        }
        if self.ticker.is_some() && self.progress.is_finished() {
            self.ticker = None;
            tracing::debug!("capture progress finished");
        }
        ticks
    }

    pub fn progress(&self) -> &CaptureProgress {
        &self.progress
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Cancel the ticker, keeping the current percentage.
    pub fn stop(&mut self) {
        self.ticker = None;
    }
}
