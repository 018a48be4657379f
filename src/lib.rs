//! Paceline - on-device smoothing and display pipeline for live workout
//! metrics
//!
//! Paceline turns noisy, bursty sensor readings (pace, heart rate, energy,
//! distance, cadence) into stable, display-ready values through a
//! deterministic pipeline: sample dispatch → smoothing → derivation →
//! formatting.
//!
//! ## Modules
//!
//! - **Smoothing**: interchangeable strategies (simple and exponential
//!   moving averages) bound to the pace stream
//! - **Metrics**: the value model coupling a reading to its unit and
//!   formatting rule
//! - **Pipeline**: routes each raw sample to direct assignment, smoothing,
//!   or cadence derivation
//!
//! The live session itself (sensor authorization, callbacks, UI) is an
//! external collaborator: Paceline only consumes `(kind, value)` samples
//! and exposes read-only snapshots.

pub mod error;
pub mod format;
pub mod metric;
pub mod pipeline;
pub mod smoothing;
pub mod snapshot;
pub mod types;

pub use error::MetricError;
pub use format::NumberFormat;
pub use metric::{Metric, MetricKind};
pub use pipeline::{derive_cadence, MetricsProcessor};
pub use smoothing::{
    ExponentialMovingAverage, SimpleMovingAverage, SmoothingAlgorithm, SmoothingConfig,
    DEFAULT_ALPHA, DEFAULT_WINDOW,
};
pub use snapshot::{MetricReading, MetricsSnapshot, SnapshotProducer};
pub use types::{EnergyUnit, LengthUnit, RateUnit, RawSample, SampleKind, SpeedUnit};

/// Paceline version embedded in every snapshot
pub const PACELINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for snapshot payloads
pub const PRODUCER_NAME: &str = "paceline";
