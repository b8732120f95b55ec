// Serial telemetry service - live ingestion and display-scaling pipeline
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
