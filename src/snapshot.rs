//! Read-only metric snapshots
//!
//! The presentation layer never touches live pipeline state. Instead it
//! consumes a [`MetricsSnapshot`]: a plain, serializable capture of every
//! metric's value and display string, stamped with producer and freshness
//! metadata.

use crate::error::MetricError;
use crate::metric::Metric;
use crate::pipeline::MetricsProcessor;
use crate::{PACELINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One metric as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub label: Option<String>,
    pub value: f64,
    pub formatted: String,
}

impl From<&Metric> for MetricReading {
    fn from(metric: &Metric) -> Self {
        Self {
            label: metric.label().map(str::to_owned),
            value: metric.value(),
            formatted: metric.formatted_value(),
        }
    }
}

/// Producer metadata embedded in every snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// A complete capture of the metric set at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub producer: SnapshotProducer,
    /// When this snapshot was taken (RFC 3339, UTC)
    pub captured_at_utc: String,
    /// Observation time of the most recent sample, if any arrived
    pub last_sample_at_utc: Option<String>,
    pub heart_rate: MetricReading,
    pub average_heart_rate: MetricReading,
    pub active_energy: MetricReading,
    pub distance: MetricReading,
    pub current_pace: MetricReading,
    pub average_pace: MetricReading,
    pub cadence: MetricReading,
}

impl MetricsSnapshot {
    pub(crate) fn capture(processor: &MetricsProcessor) -> Self {
        Self {
            producer: SnapshotProducer {
                name: PRODUCER_NAME.to_string(),
                version: PACELINE_VERSION.to_string(),
                instance_id: processor.instance_id().to_string(),
            },
            captured_at_utc: Utc::now().to_rfc3339(),
            last_sample_at_utc: processor.last_sample_at().map(|t| t.to_rfc3339()),
            heart_rate: processor.heart_rate().into(),
            average_heart_rate: processor.average_heart_rate().into(),
            active_energy: processor.active_energy().into(),
            distance: processor.distance().into(),
            current_pace: processor.current_pace().into(),
            average_pace: processor.average_pace().into(),
            cadence: processor.cadence().into(),
        }
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> Result<String, MetricError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawSample, SampleKind};

    #[test]
    fn test_snapshot_reflects_current_values() {
        let mut processor = MetricsProcessor::new();
        processor.update(&RawSample::new(SampleKind::HeartRate, 142.0));
        processor.update(&RawSample::new(SampleKind::Distance, 1250.0));

        let snapshot = processor.snapshot();
        assert_eq!(snapshot.heart_rate.value, 142.0);
        assert_eq!(snapshot.heart_rate.formatted, "142bpm");
        assert_eq!(snapshot.distance.value, 1250.0);
        assert_eq!(snapshot.distance.formatted, "1250 m");
        assert_eq!(snapshot.producer.name, "paceline");
        assert!(snapshot.last_sample_at_utc.is_some());
    }

    #[test]
    fn test_snapshot_of_fresh_processor() {
        let snapshot = MetricsProcessor::new().snapshot();

        assert_eq!(snapshot.current_pace.value, 0.0);
        assert_eq!(snapshot.cadence.formatted, "0spm");
        assert_eq!(snapshot.last_sample_at_utc, None);
        assert_eq!(snapshot.heart_rate.label.as_deref(), Some("Heart Rate"));
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let mut processor = MetricsProcessor::new();
        processor.update(&RawSample::new(SampleKind::ActiveEnergy, 312.0));

        let snapshot = processor.snapshot();
        let json = snapshot.to_json().unwrap();
        let loaded: MetricsSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let snapshot = MetricsProcessor::new().snapshot();
        let value: serde_json::Value =
            serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

        assert!(value["producer"]["instance_id"].is_string());
        assert_eq!(value["active_energy"]["value"], 0.0);
        assert_eq!(value["active_energy"]["formatted"], "0 kcal");
    }
}
