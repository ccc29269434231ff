#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core scan-session logic for the body-measurement demo (device-agnostic).
//!
//! Camera access goes through `harmony_traits::CaptureDevice`, persistence
//! through `KeyValueStore`, and randomness through `RandomSource`, so every
//! piece here runs against in-memory fakes in tests.
//!
//! ## Architecture
//!
//! - **Scan**: state machine that zeroes, fluctuates and stabilizes the
//!   displayed measurements (`scan` module)
//! - **Driver**: interval and animation timers around the machine (`driver`, `ticker`)
//! - **Formatter**: category grouping, aggregates, CSV rendering (`formatter`)
//! - **History**: JSON snapshots under a single storage key (`history`, `store`)
//! - **Capture**: camera lifecycle and error mapping (`capture`)
//! - **Export**: dated CSV files (`export`)
//! - **Setup**: validated config to runtime pieces (`builder`)
//!
//! Display state is only ever mutated on the caller's thread; timer threads
//! just produce tick events that [`ScanDriver::pump`] applies.

// Module declarations
pub mod atomic;
pub mod builder;
pub mod capture;
pub mod category;
pub mod config;
pub mod conversions;
pub mod driver;
pub mod error;
pub mod export;
pub mod formatter;
pub mod history;
pub mod landmarks;
pub mod logging;
pub mod measurement;
pub mod mocks;
pub mod progress;
pub mod random;
pub mod scan;
pub mod scanline;
pub mod store;
pub mod ticker;
pub mod util;

pub use builder::Setup;
pub use capture::{CaptureSession, CaptureStatus, map_capture_error};
pub use category::Category;
pub use config::{CaptureCfg, ExportCfg, HistoryCfg, ScanCfg, ScanLineCfg};
pub use driver::{PumpReport, ScanDriver};
pub use error::{HarmonyError, Report, Result};
pub use export::{ExportKind, export_file_name, write_csv};
pub use formatter::{
    CsvLayout, MeasurementGroup, TrendPoint, average_confidence, group_by_category, group_by_date,
    measurement_names, sorted_dates, to_csv, trend_series,
};
pub use history::{HistoryEntry, HistoryStore};
pub use measurement::{Measurement, generate_history, mock_measurements};
pub use progress::{CaptureProgress, ProgressTimer};
pub use random::SeededRandom;
pub use scan::{ScanMachine, ScanPhase, ScanSession, ScanSignals, Transition};
pub use scanline::ScanLine;
pub use store::FileStore;
pub use ticker::Ticker;
