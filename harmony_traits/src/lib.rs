//! Collaborator contracts consumed by the scan core.
//!
//! Everything the core needs from the outside world (a camera, durable
//! storage, a source of randomness, a clock) sits behind one of these traits
//! so tests can substitute in-memory fakes.
pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

/// Boxed error used at trait boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A live video capture handle (webcam or simulation).
pub trait CaptureDevice {
    /// Acquire the stream. Fails when permission is denied or no device exists.
    fn start(&mut self) -> Result<(), BoxError>;
    /// Release the stream. Stopping an inactive device is a no-op.
    fn stop(&mut self) -> Result<(), BoxError>;
    fn is_active(&self) -> bool;
}

/// Durable string key-value storage, e.g. browser-style local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, BoxError>;
    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError>;
    fn delete(&mut self, key: &str) -> Result<(), BoxError>;
}

/// Source of uniformly distributed samples.
pub trait RandomSource {
    /// Sample uniformly from the closed range `[lo, hi]`.
    /// Implementations return `lo` when `hi <= lo`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

impl<T: CaptureDevice + ?Sized> CaptureDevice for Box<T> {
    fn start(&mut self) -> Result<(), BoxError> {
        (**self).start()
    }
    fn stop(&mut self) -> Result<(), BoxError> {
        (**self).stop()
    }
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        (**self).uniform(lo, hi)
    }
}
