// Serial port connector - blocking serialport reads bridged into the async ingest loop
use crate::application::byte_source::{ByteSource, SourceConnector};
use crate::infrastructure::channel_source::ChannelSource;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{ErrorKind, Read};
use std::time::Duration;
use tokio::sync::mpsc;

/// Read timeout; also bounds how long the reader thread outlives a closed session.
const READ_TIMEOUT: Duration = Duration::from_millis(200);
const CHANNEL_DEPTH: usize = 64;
const READ_BUFFER_SIZE: usize = 1024;

#[derive(Debug, Clone)]
pub struct SerialConnector {
    path: String,
    baud_rate: u32,
}

impl SerialConnector {
    pub fn new(path: String, baud_rate: u32) -> Self {
        Self { path, baud_rate }
    }
}

#[async_trait]
impl SourceConnector for SerialConnector {
    fn name(&self) -> String {
        self.path.clone()
    }

    async fn connect(&self) -> anyhow::Result<Box<dyn ByteSource>> {
        let path = self.path.clone();
        let baud_rate = self.baud_rate;

        // 8N1, no flow control
        let port = tokio::task::spawn_blocking(move || {
            serialport::new(path, baud_rate)
                .data_bits(DataBits::Eight)
                .parity(Parity::None)
                .stop_bits(StopBits::One)
                .flow_control(FlowControl::None)
                .timeout(READ_TIMEOUT)
                .open()
        })
        .await
        .context("Serial open task panicked")?
        .with_context(|| format!("Failed to open serial port {} at {} baud", self.path, self.baud_rate))?;

        let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_loop(port, tx, &path));

        Ok(Box::new(ChannelSource::new(rx)))
    }
}

fn read_loop(mut port: Box<dyn SerialPort>, tx: mpsc::Sender<anyhow::Result<Bytes>>, path: &str) {
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        match port.read(&mut buf) {
            Ok(0) => {
                tracing::debug!("Serial port {} reported end of stream", path);
                return;
            }
            Ok(n) => {
                if tx.blocking_send(Ok(Bytes::copy_from_slice(&buf[..n]))).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::Interrupted => {
                if tx.is_closed() {
                    return;
                }
            }
            Err(e) => {
                let _ = tx.blocking_send(Err(anyhow::Error::new(e).context(format!("Serial read from {} failed", path))));
                return;
            }
        }
    }
}
