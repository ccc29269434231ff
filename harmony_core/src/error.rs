use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarmonyError {
    /// Camera permission denied or hardware absent. Surfaced with a retry affordance.
    #[error("camera unavailable: {reason}")]
    CaptureUnavailable { reason: String, retryable: bool },
    #[error("capture error: {0}")]
    Capture(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
}

impl HarmonyError {
    /// True when the caller may offer the user a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HarmonyError::CaptureUnavailable {
                retryable: true,
                ..
            }
        )
    }
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
