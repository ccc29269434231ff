//! Capture session lifecycle and device error mapping.
//!
//! The `CaptureDevice` trait uses `Box<dyn Error>` at its boundary; this
//! module converts those errors to `HarmonyError`, with an optional
//! feature-gated path for `harmony_media::error::MediaError` downcasting.

use harmony_traits::CaptureDevice;

use crate::error::{HarmonyError, Result};

/// Map a device error to a typed `HarmonyError`.
///
/// Permission and missing-device failures become a retryable
/// `CaptureUnavailable`; anything else is a plain `Capture` error.
pub fn map_capture_error(e: &(dyn std::error::Error + 'static)) -> HarmonyError {
    #[cfg(feature = "media-errors")]
    {
        use harmony_media::error::MediaError;
        if let Some(me) = e.downcast_ref::<MediaError>() {
            return match me {
                MediaError::PermissionDenied | MediaError::NotFound => {
                    HarmonyError::CaptureUnavailable {
                        reason: me.to_string(),
                        retryable: true,
                    }
                }
                other => HarmonyError::Capture(other.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    let lower = s.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not found") {
        HarmonyError::CaptureUnavailable {
            reason: s,
            retryable: true,
        }
    } else {
        HarmonyError::Capture(s)
    }
}

/// Current state of the camera from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStatus {
    Stopped,
    Live,
    /// Last start attempt failed; the message is suitable for display next to a retry button.
    Unavailable(String),
}

/// Owns a capture device for the lifetime of a view. The stream is released on drop.
pub struct CaptureSession<D: CaptureDevice> {
    device: D,
    status: CaptureStatus,
    attempts: u32,
}

impl<D: CaptureDevice> CaptureSession<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            status: CaptureStatus::Stopped,
            attempts: 0,
        }
    }

    pub fn status(&self) -> &CaptureStatus {
        &self.status
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Start attempts made so far, successful or not.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Acquire the stream. A no-op when already live.
    pub fn start(&mut self) -> Result<()> {
        if self.status == CaptureStatus::Live && self.device.is_active() {
            return Ok(());
        }
        self.attempts = self.attempts.saturating_add(1);
        match self.device.start() {
            Ok(()) => {
                self.status = CaptureStatus::Live;
                tracing::info!(attempt = self.attempts, "capture started");
                Ok(())
            }
            Err(e) => {
                let mapped = map_capture_error(&*e);
                tracing::warn!(attempt = self.attempts, error = %mapped, "capture start failed");
                self.status = CaptureStatus::Unavailable(mapped.to_string());
                Err(eyre::Report::new(mapped))
            }
        }
    }

    /// Retry after an unavailable result. Only meaningful when the last failure was retryable.
    pub fn retry(&mut self) -> Result<()> {
        self.start()
    }

    /// Release the stream.
    pub fn stop(&mut self) -> Result<()> {
        if self.device.is_active() {
            self.device
                .stop()
                .map_err(|e| eyre::Report::new(map_capture_error(&*e)))?;
            tracing::info!("capture stopped");
        }
        self.status = CaptureStatus::Stopped;
        Ok(())
    }
}

impl<D: CaptureDevice> Drop for CaptureSession<D> {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!(error = %e, "capture stop failed on drop");
        }
    }
}
