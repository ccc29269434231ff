//! Decorative scan-line position for the scanning overlay.

use crate::config::ScanLineCfg;

/// Vertical position in percent of the frame height, wrapping at 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanLine {
    position: f64,
    step: f64,
}

impl ScanLine {
    pub fn new(cfg: &ScanLineCfg) -> Self {
        Self {
            position: 0.0,
            step: cfg.step_percent,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Advance by `frames` animation frames.
    pub fn advance(&mut self, frames: usize) -> f64 {
        for _ in 0..frames {
            self.position += self.step;
            if self.position >= 100.0 {
                self.position = 0.0;
            }
        }
        self.position
    }

    pub fn reset(&mut self) {
        self.position = 0.0;
    }
}
