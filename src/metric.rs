//! The workout metric model
//!
//! A [`Metric`] binds a raw numeric value to a semantic kind, a display
//! unit, and a formatting rule. The kind is fixed for the lifetime of the
//! metric; only the value mutates as samples arrive.

use crate::format::NumberFormat;
use crate::types::{EnergyUnit, LengthUnit, RateUnit, SpeedUnit};
use std::sync::Arc;
use uuid::Uuid;

/// Semantic kind of a metric, carrying its display unit and formatting rule
///
/// Formatting rules are shared immutable configuration: metrics of the same
/// kind typically point at one `Arc<NumberFormat>`.
#[derive(Debug, Clone)]
pub enum MetricKind {
    ActiveEnergy(EnergyUnit, Arc<NumberFormat>),
    HeartRate(RateUnit, Arc<NumberFormat>),
    AverageHeartRate(RateUnit, Arc<NumberFormat>),
    Distance(LengthUnit, Arc<NumberFormat>),
    CurrentPace(SpeedUnit, Arc<NumberFormat>),
    AveragePace(SpeedUnit, Arc<NumberFormat>),
    Cadence(RateUnit, Arc<NumberFormat>),
}

/// One tracked quantity with its current value
///
/// Created once per tracked quantity at session start (value 0), mutated in
/// place on every matching sample, and reset as a set at session end. The
/// presentation layer only ever reads; `set` accepts any value without
/// validation because the surrounding system permits negative or oversized
/// readings from faulty sensors.
#[derive(Debug, Clone)]
pub struct Metric {
    id: Uuid,
    label: Option<String>,
    kind: MetricKind,
    value: f64,
}

impl Metric {
    pub fn new(kind: MetricKind, value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: None,
            kind,
            value,
        }
    }

    pub fn with_label(kind: MetricKind, value: f64, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: Some(label.into()),
            kind,
            value,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> &MetricKind {
        &self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unconditionally replace the current value
    pub fn set(&mut self, new_value: f64) {
        self.value = new_value;
    }

    /// Render the current value under this metric's formatting rule
    ///
    /// Measurement-style kinds (energy, distance, pace) separate the unit
    /// abbreviation with a space; count-rate kinds (heart rate, cadence)
    /// append their suffix directly.
    pub fn formatted_value(&self) -> String {
        match &self.kind {
            MetricKind::ActiveEnergy(unit, format) => {
                format!("{} {}", format.format(self.value), unit.abbreviation())
            }
            MetricKind::HeartRate(unit, format) | MetricKind::AverageHeartRate(unit, format) => {
                format!("{}{}", format.format(self.value), unit.abbreviation())
            }
            MetricKind::Distance(unit, format) => {
                format!("{} {}", format.format(self.value), unit.abbreviation())
            }
            MetricKind::CurrentPace(unit, format) | MetricKind::AveragePace(unit, format) => {
                format!("{} {}", format.format(self.value), unit.abbreviation())
            }
            MetricKind::Cadence(unit, format) => {
                format!("{}{}", format.format(self.value), unit.abbreviation())
            }
        }
    }
}
