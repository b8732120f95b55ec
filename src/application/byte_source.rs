// Byte source traits - where raw telemetry bytes come from
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait ByteSource: Send {
    /// Next chunk of raw bytes, `None` once the stream has ended.
    /// Must be cancel-safe: the ingest loop races it against the tick timer.
    async fn read_chunk(&mut self) -> anyhow::Result<Option<Bytes>>;
}

#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Human-readable port name reported in the connection status
    fn name(&self) -> String;

    /// Open the underlying device or stream
    async fn connect(&self) -> anyhow::Result<Box<dyn ByteSource>>;
}
