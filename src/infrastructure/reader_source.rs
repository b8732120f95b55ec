// Byte source over any async reader (TCP bridge, stdin)
use crate::application::byte_source::ByteSource;
use anyhow::Context;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_BUFFER_SIZE: usize = 4096;

pub struct ReaderSource<R> {
    reader: R,
    buffer: BytesMut,
}

impl<R: AsyncRead + Unpin + Send> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> ByteSource for ReaderSource<R> {
    async fn read_chunk(&mut self) -> anyhow::Result<Option<Bytes>> {
        self.buffer.reserve(READ_BUFFER_SIZE);
        let n = self
            .reader
            .read_buf(&mut self.buffer)
            .await
            .context("Failed to read telemetry stream")?;

        if n == 0 {
            return Ok(None);
        }
        Ok(Some(self.buffer.split().freeze()))
    }
}
