//! Core types for the Paceline pipeline
//!
//! This module defines the sample vocabulary delivered by the live data
//! source and the display units carried by metrics. Samples arrive already
//! normalized to base units (meters, meters/second, beats/minute,
//! kilocalories); the unit tags here drive display formatting only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Semantic kind of an incoming raw sample
///
/// Each kind maps to exactly one pipeline action: direct assignment,
/// smoothing, or derivation. See [`crate::pipeline::MetricsProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    /// Instantaneous heart rate (beats/minute)
    HeartRate,
    /// Windowed average heart rate, pre-averaged by the data source
    AverageHeartRate,
    /// Cumulative active energy (kilocalories)
    ActiveEnergy,
    /// Cumulative distance for any locomotion mode (meters)
    Distance,
    /// Raw speed sample for any locomotion mode (meters/second)
    Speed,
    /// Windowed average speed, pre-averaged by the data source
    AverageSpeed,
    /// Stride or step length (meters)
    StrideLength,
    /// Already rate-based cadence, e.g. from a cycling sensor
    Cadence,
}

/// A single raw reading from the live data source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Semantic kind of the reading
    pub kind: SampleKind,
    /// Scalar value in the base unit for this kind
    pub value: f64,
    /// When the data source observed the reading (UTC)
    pub observed_at: DateTime<Utc>,
}

impl RawSample {
    /// Create a sample stamped with the current time
    pub fn new(kind: SampleKind, value: f64) -> Self {
        Self {
            kind,
            value,
            observed_at: Utc::now(),
        }
    }

    /// Create a sample with an explicit observation time
    pub fn observed(kind: SampleKind, value: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            value,
            observed_at,
        }
    }
}

/// Display unit for energy metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnit {
    Kilocalories,
    Kilojoules,
}

impl EnergyUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            EnergyUnit::Kilocalories => "kcal",
            EnergyUnit::Kilojoules => "kJ",
        }
    }
}

/// Display unit for distance metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Miles,
}

impl LengthUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
            LengthUnit::Miles => "mi",
        }
    }
}

/// Display unit for pace metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            SpeedUnit::MetersPerSecond => "m/s",
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MilesPerHour => "mph",
        }
    }
}

/// Display unit for count-per-minute metrics (heart rate and cadence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    /// Beats per minute
    Bpm,
    /// Revolutions per minute (cycling cadence)
    Rpm,
    /// Steps per minute (running/walking cadence)
    Spm,
}

impl RateUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            RateUnit::Bpm => "bpm",
            RateUnit::Rpm => "rpm",
            RateUnit::Spm => "spm",
        }
    }
}
