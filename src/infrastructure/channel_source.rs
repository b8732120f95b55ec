// Channel-backed byte source, fed by a producer task or thread
use crate::application::byte_source::ByteSource;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

pub struct ChannelSource {
    rx: mpsc::Receiver<anyhow::Result<Bytes>>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<anyhow::Result<Bytes>>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl ByteSource for ChannelSource {
    async fn read_chunk(&mut self) -> anyhow::Result<Option<Bytes>> {
        // All senders gone means the producer hit end of stream
        match self.rx.recv().await {
            Some(chunk) => chunk.map(Some),
            None => Ok(None),
        }
    }
}
