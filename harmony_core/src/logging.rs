//! Tracing subscriber setup driven by the `[logging]` config section.
//!
//! Library code only emits `tracing` events; whoever embeds the core calls
//! [`init`] once to decide where they go.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::error::Result;

/// Map the configured rotation name to an appender rotation. Unknown names mean never.
pub fn rotation_from(name: Option<&str>) -> Rotation {
    match name.map(str::to_ascii_lowercase).as_deref() {
        Some("daily") => Rotation::DAILY,
        Some("hourly") => Rotation::HOURLY,
        _ => Rotation::NEVER,
    }
}

/// Build the filter: `RUST_LOG` wins, then the configured level, then `info`.
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info").to_ascii_lowercase()))
}

/// Install the global subscriber.
///
/// Console output is pretty or JSON lines; when `cfg.file` is set, JSON lines
/// are also written there through a non-blocking appender. Keep the returned
/// guard alive for as long as file logging should flush.
pub fn init(cfg: &harmony_config::Logging) -> Result<Option<WorkerGuard>> {
    let console = if cfg.json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let (file_layer, guard) = match cfg.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {file}"))?;
            let appender =
                RollingFileAppender::new(rotation_from(cfg.rotation.as_deref()), dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(cfg.level.as_deref()))
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("install tracing subscriber: {e}"))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_names() {
        assert_eq!(rotation_from(Some("daily")), Rotation::DAILY);
        assert_eq!(rotation_from(Some("HOURLY")), Rotation::HOURLY);
        assert_eq!(rotation_from(Some("never")), Rotation::NEVER);
        assert_eq!(rotation_from(None), Rotation::NEVER);
    }
}
