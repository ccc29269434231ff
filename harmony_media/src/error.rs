use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device found")]
    NotFound,
    #[error("camera already streaming")]
    AlreadyActive,
    #[error("camera stream failed: {0}")]
    Stream(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;
