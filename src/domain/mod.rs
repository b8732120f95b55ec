// Domain layer - Samples, display events and the scaling policies
pub mod axis;
pub mod config;
pub mod decoder;
pub mod error;
pub mod history;
pub mod scroll;
pub mod telemetry;
