// Pipeline configuration recognized at construction time
use super::error::ConfigError;
use serde::Deserialize;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_WINDOW_WIDTH: u64 = 100;
pub const DEFAULT_SHRINK_MARGIN: f64 = 20.0;
pub const DEFAULT_INITIAL_Y_MAX: f64 = 50.0;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub history_capacity: usize,
    pub window_width: u64,
    pub shrink_margin: f64,
    pub initial_y_max: f64,
    pub max_line_length: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            window_width: DEFAULT_WINDOW_WIDTH,
            shrink_margin: DEFAULT_SHRINK_MARGIN,
            initial_y_max: DEFAULT_INITIAL_Y_MAX,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.window_width == 0 {
            return Err(ConfigError::ZeroWindowWidth);
        }
        if !self.initial_y_max.is_finite() || self.initial_y_max < 1.0 {
            return Err(ConfigError::InvalidInitialYMax(self.initial_y_max));
        }
        if !self.shrink_margin.is_finite() || self.shrink_margin < 0.0 {
            return Err(ConfigError::InvalidShrinkMargin(self.shrink_margin));
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::ZeroMaxLineLength);
        }
        Ok(())
    }
}
