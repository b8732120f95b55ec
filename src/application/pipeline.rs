// Telemetry pipeline - single ingestion entry point composing decoder, history and axis policies
use crate::domain::axis::AxisScalePolicy;
use crate::domain::config::PipelineConfig;
use crate::domain::decoder::LineSampleDecoder;
use crate::domain::error::ConfigError;
use crate::domain::history::RollingHistory;
use crate::domain::scroll::ScrollWindowPolicy;
use crate::domain::telemetry::{ConnectionStatus, DisplayUpdate, Sample, StatusSnapshot};
use chrono::Utc;

/// Shown as the port when samples arrive without an attached source name.
const UNKNOWN_PORT: &str = "N/A";

/// Consumer of display updates (the view layer).
pub trait DisplaySink: Send {
    fn on_update(&mut self, update: DisplayUpdate);
}

/// Collects updates in memory.
impl DisplaySink for Vec<DisplayUpdate> {
    fn on_update(&mut self, update: DisplayUpdate) {
        self.push(update);
    }
}

pub struct TelemetryPipeline<S: DisplaySink> {
    decoder: LineSampleDecoder,
    display: DisplayState<S>,
}

/// Everything downstream of the decoder.
struct DisplayState<S> {
    history: RollingHistory,
    axis: AxisScalePolicy,
    scroll: ScrollWindowPolicy,
    next_index: u64,
    port: Option<String>,
    status: ConnectionStatus,
    sink: S,
}

impl<S: DisplaySink> TelemetryPipeline<S> {
    pub fn new(config: &PipelineConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            decoder: LineSampleDecoder::new(config.max_line_length),
            display: DisplayState {
                history: RollingHistory::new(config.history_capacity),
                axis: AxisScalePolicy::new(config.initial_y_max, config.shrink_margin),
                scroll: ScrollWindowPolicy::new(config.window_width),
                next_index: 0,
                port: None,
                status: ConnectionStatus::Disconnected,
                sink,
            },
        })
    }

    /// Record the name of the opened source; status turns connected on the next sample.
    pub fn attach_port(&mut self, name: impl Into<String>) {
        self.display.port = Some(name.into());
    }

    /// The source session is over: forget its name and any unterminated line it left.
    pub fn detach_port(&mut self) {
        self.display.port = None;
        self.decoder.clear();
    }

    /// Decode a chunk and emit one update per accepted sample, in line order.
    /// Returns the number of samples accepted.
    pub fn on_bytes(&mut self, chunk: &[u8]) -> usize {
        let mut accepted = 0;
        for value in self.decoder.decode(chunk) {
            self.display.accept(value);
            accepted += 1;
        }
        accepted
    }

    /// Run the shrink check. Emits an axis-only update if the bound changed.
    pub fn on_tick(&mut self) -> bool {
        self.display.tick()
    }

    /// Back to the initial history, axes, index and a disconnected status.
    /// The attached port name survives so a reopened source keeps its label,
    /// and a line cut by the reset is skipped rather than read as a new one.
    pub fn reset(&mut self) {
        self.decoder.reset();

        let display = &mut self.display;
        display.history.clear();
        display.axis.reset();
        display.scroll.reset();
        display.next_index = 0;
        display.status = ConnectionStatus::Disconnected;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.display.status.clone(),
            y_axis_max: self.display.axis.current_max(),
            x_axis_range: self.display.scroll.range(),
            sample_count: self.display.next_index,
            dropped_lines: self.decoder.dropped_lines(),
        }
    }

    pub fn y_axis_max(&self) -> f64 {
        self.display.axis.current_max()
    }

    pub fn sample_count(&self) -> u64 {
        self.display.next_index
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.display.status
    }

    pub fn history(&self) -> &RollingHistory {
        &self.display.history
    }

    pub fn sink(&self) -> &S {
        &self.display.sink
    }
}

impl<S: DisplaySink> DisplayState<S> {
    fn accept(&mut self, value: f64) {
        let sample = Sample::new(self.next_index, value);
        self.next_index += 1;

        self.history.push(value);
        if self.axis.on_sample(value) {
            tracing::debug!("Expanding Y axis to {}", self.axis.current_max());
        }
        let range = self.scroll.advance(self.next_index);

        self.status = ConnectionStatus::Connected {
            port: self.port.clone().unwrap_or_else(|| UNKNOWN_PORT.to_string()),
            last_value: value,
            last_update: Utc::now(),
        };

        let update = DisplayUpdate::for_sample(sample, self.axis.current_max(), range, self.status.clone());
        self.sink.on_update(update);
    }

    fn tick(&mut self) -> bool {
        if !self.axis.on_tick(self.history.max()) {
            return false;
        }

        tracing::info!("Shrinking Y axis to {}", self.axis.current_max());
        let update = DisplayUpdate::axis_only(self.axis.current_max(), self.scroll.range(), self.status.clone());
        self.sink.on_update(update);
        true
    }
}
