// Scroll window policy - trailing X-axis window over the sample index
use super::telemetry::AxisRange;

#[derive(Debug, Clone)]
pub struct ScrollWindowPolicy {
    window_width: u64,
    range: AxisRange,
}

impl ScrollWindowPolicy {
    pub fn new(window_width: u64) -> Self {
        Self {
            window_width,
            range: AxisRange::new(0, window_width),
        }
    }

    /// Visible range for a stream holding `sample_count` samples.
    pub fn range_for(window_width: u64, sample_count: u64) -> AxisRange {
        if sample_count <= window_width {
            AxisRange::new(0, window_width)
        } else {
            AxisRange::new(sample_count - window_width, sample_count)
        }
    }

    pub fn advance(&mut self, sample_count: u64) -> AxisRange {
        self.range = Self::range_for(self.window_width, sample_count);
        self.range
    }

    pub fn range(&self) -> AxisRange {
        self.range
    }

    pub fn reset(&mut self) {
        self.range = AxisRange::new(0, self.window_width);
    }
}
