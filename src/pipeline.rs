//! Pipeline orchestration
//!
//! [`MetricsProcessor`] is the public entry point of Paceline. It owns the
//! full metric set for one live session, routes each incoming raw sample to
//! direct assignment, smoothing, or derivation, and hands read-only
//! snapshots to the presentation layer.

use crate::error::MetricError;
use crate::format::NumberFormat;
use crate::metric::{Metric, MetricKind};
use crate::smoothing::{SimpleMovingAverage, SmoothingAlgorithm, SmoothingConfig};
use crate::snapshot::MetricsSnapshot;
use crate::types::{EnergyUnit, LengthUnit, RateUnit, RawSample, SampleKind, SpeedUnit};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Derive cadence (steps per minute) from stride length and the current
/// smoothed pace
///
/// A stride length of zero is a plausible transient sensor state, not a
/// program error, so the degenerate case yields `0.0` instead of letting
/// infinity or NaN reach a displayed value.
pub fn derive_cadence(stride_length: f64, current_pace: f64) -> f64 {
    if stride_length == 0.0 {
        return 0.0;
    }
    let cadence = (current_pace / stride_length) * SECONDS_PER_MINUTE;
    if cadence.is_finite() {
        cadence
    } else {
        0.0
    }
}

/// Stateful processor routing raw sensor samples into display metrics
///
/// Single-writer, synchronous: exactly one producer delivers samples, one
/// at a time, through [`update`](Self::update). Callers integrating with
/// concurrent sensor callbacks must serialize delivery before it reaches
/// the processor; the smoothing recurrences are order-dependent.
#[derive(Debug)]
pub struct MetricsProcessor {
    heart_rate: Metric,
    average_heart_rate: Metric,
    active_energy: Metric,
    distance: Metric,
    current_pace: Metric,
    average_pace: Metric,
    cadence: Metric,
    smoother: Box<dyn SmoothingAlgorithm>,
    smoothing: SmoothingConfig,
    instance_id: String,
    last_sample_at: Option<DateTime<Utc>>,
}

impl Default for MetricsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProcessor {
    /// Create a processor with the default simple-moving-average smoother
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(SimpleMovingAverage::default()),
            SmoothingConfig::default(),
        )
    }

    /// Create a processor with an explicit smoothing strategy for the pace
    /// stream
    ///
    /// This is the single configuration point for selecting smoothing
    /// behavior. Fails when the strategy parameters are invalid.
    pub fn with_smoothing(smoothing: SmoothingConfig) -> Result<Self, MetricError> {
        Ok(Self::with_parts(smoothing.build()?, smoothing))
    }

    fn with_parts(smoother: Box<dyn SmoothingAlgorithm>, smoothing: SmoothingConfig) -> Self {
        let integer = Arc::new(NumberFormat::new(0));
        let decimal = Arc::new(NumberFormat::new(2));

        Self {
            heart_rate: Metric::with_label(
                MetricKind::HeartRate(RateUnit::Bpm, Arc::clone(&integer)),
                0.0,
                "Heart Rate",
            ),
            average_heart_rate: Metric::with_label(
                MetricKind::AverageHeartRate(RateUnit::Bpm, Arc::clone(&integer)),
                0.0,
                "Avg. Heart Rate",
            ),
            active_energy: Metric::with_label(
                MetricKind::ActiveEnergy(EnergyUnit::Kilocalories, Arc::clone(&integer)),
                0.0,
                "Active Energy",
            ),
            distance: Metric::with_label(
                MetricKind::Distance(LengthUnit::Meters, Arc::clone(&integer)),
                0.0,
                "Distance",
            ),
            current_pace: Metric::with_label(
                MetricKind::CurrentPace(SpeedUnit::MetersPerSecond, Arc::clone(&decimal)),
                0.0,
                "Current Pace",
            ),
            average_pace: Metric::with_label(
                MetricKind::AveragePace(SpeedUnit::MetersPerSecond, decimal),
                0.0,
                "Avg. Pace",
            ),
            cadence: Metric::with_label(
                MetricKind::Cadence(RateUnit::Spm, integer),
                0.0,
                "Cadence",
            ),
            smoother,
            smoothing,
            instance_id: Uuid::new_v4().to_string(),
            last_sample_at: None,
        }
    }

    /// Route one raw sample to its metric
    ///
    /// Sequencing precondition: cadence derivation reads the already-smoothed
    /// current pace, so when a speed sample and a stride-length sample
    /// describe the same instant, the speed sample must be delivered first.
    pub fn update(&mut self, sample: &RawSample) {
        match sample.kind {
            SampleKind::HeartRate => self.heart_rate.set(sample.value),
            SampleKind::AverageHeartRate => self.average_heart_rate.set(sample.value),
            SampleKind::ActiveEnergy => self.active_energy.set(sample.value),
            SampleKind::Distance => self.distance.set(sample.value),
            SampleKind::Speed => {
                let smoothed = self.smoother.smooth_pace(sample.value);
                self.current_pace.set(smoothed);
            }
            SampleKind::AverageSpeed => self.average_pace.set(sample.value),
            SampleKind::StrideLength => {
                let cadence = derive_cadence(sample.value, self.current_pace.value());
                self.cadence.set(cadence);
            }
            SampleKind::Cadence => self.cadence.set(sample.value),
        }
        self.last_sample_at = Some(sample.observed_at);
    }

    /// Zero every metric and discard smoothing state at session end
    pub fn reset(&mut self) {
        self.heart_rate.set(0.0);
        self.average_heart_rate.set(0.0);
        self.active_energy.set(0.0);
        self.distance.set(0.0);
        self.current_pace.set(0.0);
        self.average_pace.set(0.0);
        self.cadence.set(0.0);
        self.smoother.reset();
        self.last_sample_at = None;
    }

    /// Capture a read-only snapshot of every metric for the presentation
    /// layer
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::capture(self)
    }

    pub fn smoothing_config(&self) -> SmoothingConfig {
        self.smoothing
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Observation time of the most recent sample, if any arrived yet
    pub fn last_sample_at(&self) -> Option<DateTime<Utc>> {
        self.last_sample_at
    }

    pub fn heart_rate(&self) -> &Metric {
        &self.heart_rate
    }

    pub fn average_heart_rate(&self) -> &Metric {
        &self.average_heart_rate
    }

    pub fn active_energy(&self) -> &Metric {
        &self.active_energy
    }

    pub fn distance(&self) -> &Metric {
        &self.distance
    }

    pub fn current_pace(&self) -> &Metric {
        &self.current_pace
    }

    pub fn average_pace(&self) -> &Metric {
        &self.average_pace
    }

    pub fn cadence(&self) -> &Metric {
        &self.cadence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(processor: &mut MetricsProcessor, kind: SampleKind, value: f64) {
        processor.update(&RawSample::new(kind, value));
    }

    #[test]
    fn test_direct_assignment_kinds() {
        let mut processor = MetricsProcessor::new();

        feed(&mut processor, SampleKind::HeartRate, 142.0);
        feed(&mut processor, SampleKind::AverageHeartRate, 128.0);
        feed(&mut processor, SampleKind::ActiveEnergy, 250.0);
        feed(&mut processor, SampleKind::Distance, 1800.0);
        feed(&mut processor, SampleKind::AverageSpeed, 2.8);

        assert_eq!(processor.heart_rate().value(), 142.0);
        assert_eq!(processor.average_heart_rate().value(), 128.0);
        assert_eq!(processor.active_energy().value(), 250.0);
        assert_eq!(processor.distance().value(), 1800.0);
        assert_eq!(processor.average_pace().value(), 2.8);
    }

    #[test]
    fn test_speed_samples_pass_through_smoother() {
        // Default SMA window of 5: means of the trailing window.
        let mut processor = MetricsProcessor::new();

        feed(&mut processor, SampleKind::Speed, 10.0);
        assert_eq!(processor.current_pace().value(), 10.0);
        feed(&mut processor, SampleKind::Speed, 20.0);
        assert_eq!(processor.current_pace().value(), 15.0);
        feed(&mut processor, SampleKind::Speed, 30.0);
        assert_eq!(processor.current_pace().value(), 20.0);
    }

    #[test]
    fn test_average_speed_is_never_smoothed() {
        let mut processor = MetricsProcessor::new();

        feed(&mut processor, SampleKind::Speed, 10.0);
        feed(&mut processor, SampleKind::AverageSpeed, 10.0);
        feed(&mut processor, SampleKind::AverageSpeed, 30.0);

        // Arrives pre-averaged: assigned directly, no recurrence applied.
        assert_eq!(processor.average_pace().value(), 30.0);
    }

    #[test]
    fn test_ema_smoothing_configuration() {
        let mut processor = MetricsProcessor::with_smoothing(
            SmoothingConfig::ExponentialMovingAverage { alpha: 0.5 },
        )
        .unwrap();

        feed(&mut processor, SampleKind::Speed, 10.0);
        feed(&mut processor, SampleKind::Speed, 20.0);
        assert_eq!(processor.current_pace().value(), 15.0);
    }

    #[test]
    fn test_invalid_smoothing_configuration() {
        assert!(MetricsProcessor::with_smoothing(
            SmoothingConfig::SimpleMovingAverage { window: 0 }
        )
        .is_err());
        assert!(MetricsProcessor::with_smoothing(
            SmoothingConfig::ExponentialMovingAverage { alpha: 1.2 }
        )
        .is_err());
    }

    #[test]
    fn test_cadence_derived_from_smoothed_pace() {
        let mut processor = MetricsProcessor::new();

        // Two speed samples: smoothed pace is 1.5 m/s.
        feed(&mut processor, SampleKind::Speed, 1.0);
        feed(&mut processor, SampleKind::Speed, 2.0);
        feed(&mut processor, SampleKind::StrideLength, 0.75);

        // (1.5 / 0.75) * 60 = 120 steps per minute.
        assert_eq!(processor.cadence().value(), 120.0);
    }

    #[test]
    fn test_cadence_sample_assigned_directly() {
        let mut processor = MetricsProcessor::new();

        feed(&mut processor, SampleKind::Cadence, 85.0);
        assert_eq!(processor.cadence().value(), 85.0);
    }

    #[test]
    fn test_derive_cadence_zero_stride_yields_zero() {
        assert_eq!(derive_cadence(0.0, 3.5), 0.0);
        assert_eq!(derive_cadence(0.0, 0.0), 0.0);
        assert_eq!(derive_cadence(0.0, -2.0), 0.0);
    }

    #[test]
    fn test_derive_cadence_never_emits_non_finite() {
        assert!(derive_cadence(f64::MIN_POSITIVE, f64::MAX).is_finite());
        assert_eq!(derive_cadence(1.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_derive_cadence_formula() {
        assert_eq!(derive_cadence(1.0, 2.0), 120.0);
        assert_eq!(derive_cadence(0.5, 1.0), 120.0);
    }

    #[test]
    fn test_zero_stride_sample_does_not_poison_display() {
        let mut processor = MetricsProcessor::new();

        feed(&mut processor, SampleKind::Speed, 3.0);
        feed(&mut processor, SampleKind::StrideLength, 0.0);

        assert_eq!(processor.cadence().value(), 0.0);
        assert_eq!(processor.cadence().formatted_value(), "0spm");
    }

    #[test]
    fn test_reset_zeroes_metrics_and_smoothing_state() {
        let mut processor = MetricsProcessor::new();

        feed(&mut processor, SampleKind::HeartRate, 150.0);
        feed(&mut processor, SampleKind::Speed, 10.0);
        feed(&mut processor, SampleKind::Speed, 20.0);

        processor.reset();

        assert_eq!(processor.heart_rate().value(), 0.0);
        assert_eq!(processor.current_pace().value(), 0.0);
        assert_eq!(processor.last_sample_at(), None);

        // Fresh window: the first sample after reset is its own average.
        feed(&mut processor, SampleKind::Speed, 40.0);
        assert_eq!(processor.current_pace().value(), 40.0);
    }

    #[test]
    fn test_update_records_last_sample_time() {
        let mut processor = MetricsProcessor::new();
        assert_eq!(processor.last_sample_at(), None);

        let sample = RawSample::new(SampleKind::Distance, 500.0);
        processor.update(&sample);
        assert_eq!(processor.last_sample_at(), Some(sample.observed_at));
    }
}
