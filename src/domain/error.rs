// Domain errors
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("history capacity must be greater than zero")]
    ZeroHistoryCapacity,

    #[error("window width must be greater than zero")]
    ZeroWindowWidth,

    #[error("initial y max must be a finite value >= 1, got {0}")]
    InvalidInitialYMax(f64),

    #[error("shrink margin must be a finite non-negative value, got {0}")]
    InvalidShrinkMargin(f64),

    #[error("max line length must be greater than zero")]
    ZeroMaxLineLength,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("update channel capacity must be greater than zero")]
    ZeroChannelCapacity,
}
