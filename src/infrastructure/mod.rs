// Infrastructure layer - External dependencies and adapters
pub mod broadcast_sink;
pub mod channel_source;
pub mod chunked_stream;
pub mod config;
pub mod connectors;
pub mod http_response;
pub mod reader_source;
pub mod serial_source;
