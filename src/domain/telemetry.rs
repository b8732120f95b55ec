// Telemetry domain models - samples and the events handed to the view layer
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One accepted value together with the arrival index assigned by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub index: u64,
    pub value: f64,
}

impl Sample {
    pub fn new(index: u64, value: f64) -> Self {
        Self { index, value }
    }
}

/// Visible X-axis window `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisRange {
    pub lo: u64,
    pub hi: u64,
}

impl AxisRange {
    pub fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    pub fn width(&self) -> u64 {
        self.hi - self.lo
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ConnectionStatus {
    Disconnected,
    #[serde(rename_all = "camelCase")]
    Connected {
        port: String,
        last_value: f64,
        last_update: DateTime<Utc>,
    },
}

/// Event emitted to the consumer, either for an accepted sample or for an
/// axis change decided on a tick (in which case `index` and `value` are absent).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub y_axis_max: f64,
    pub x_axis_range: AxisRange,
    pub status: ConnectionStatus,
}

impl DisplayUpdate {
    pub fn for_sample(
        sample: Sample,
        y_axis_max: f64,
        x_axis_range: AxisRange,
        status: ConnectionStatus,
    ) -> Self {
        Self {
            index: Some(sample.index),
            value: Some(sample.value),
            y_axis_max,
            x_axis_range,
            status,
        }
    }

    pub fn axis_only(y_axis_max: f64, x_axis_range: AxisRange, status: ConnectionStatus) -> Self {
        Self {
            index: None,
            value: None,
            y_axis_max,
            x_axis_range,
            status,
        }
    }

    pub fn sample(&self) -> Option<Sample> {
        match (self.index, self.value) {
            (Some(index), Some(value)) => Some(Sample::new(index, value)),
            _ => None,
        }
    }
}

/// Pull-style view of the pipeline state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: ConnectionStatus,
    pub y_axis_max: f64,
    pub x_axis_range: AxisRange,
    pub sample_count: u64,
    pub dropped_lines: u64,
}
