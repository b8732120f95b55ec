// Application layer - Pipeline composition and the ingest driver
pub mod byte_source;
pub mod ingest_service;
pub mod pipeline;
