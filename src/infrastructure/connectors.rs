// Source connectors selected from configuration
use crate::application::byte_source::{ByteSource, SourceConnector};
use crate::infrastructure::config::SourceConfig;
use crate::infrastructure::reader_source::ReaderSource;
use crate::infrastructure::serial_source::SerialConnector;
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::net::TcpStream;

/// Serial-over-network bridge (e.g. ser2net)
#[derive(Debug, Clone)]
pub struct TcpConnector {
    address: String,
}

impl TcpConnector {
    pub fn new(address: String) -> Self {
        Self { address }
    }
}

#[async_trait]
impl SourceConnector for TcpConnector {
    fn name(&self) -> String {
        format!("tcp://{}", self.address)
    }

    async fn connect(&self) -> anyhow::Result<Box<dyn ByteSource>> {
        let stream = TcpStream::connect(&self.address)
            .await
            .with_context(|| format!("Failed to connect to {}", self.address))?;
        Ok(Box::new(ReaderSource::new(stream)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdinConnector;

#[async_trait]
impl SourceConnector for StdinConnector {
    fn name(&self) -> String {
        "stdin".to_string()
    }

    async fn connect(&self) -> anyhow::Result<Box<dyn ByteSource>> {
        Ok(Box::new(ReaderSource::new(tokio::io::stdin())))
    }
}

pub fn connector_for(source: &SourceConfig) -> Arc<dyn SourceConnector> {
    match source {
        SourceConfig::Serial { path, baud_rate } => Arc::new(SerialConnector::new(path.clone(), *baud_rate)),
        SourceConfig::Tcp { address } => Arc::new(TcpConnector::new(address.clone())),
        SourceConfig::Stdin => Arc::new(StdinConnector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_connector_names() {
        let serial = connector_for(&SourceConfig::Serial {
            path: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
        });
        assert_eq!(serial.name(), "/dev/ttyUSB0");

        let tcp = connector_for(&SourceConfig::Tcp {
            address: "localhost:4000".to_string(),
        });
        assert_eq!(tcp.name(), "tcp://localhost:4000");

        assert_eq!(connector_for(&SourceConfig::Stdin).name(), "stdin");
    }

    #[tokio::test]
    async fn test_tcp_connector_reads_stream() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"3.25\n").await.unwrap();
        });

        let connector = TcpConnector::new(address);
        let mut source = connector.connect().await.unwrap();

        let mut received = Vec::new();
        while let Some(chunk) = source.read_chunk().await.unwrap() {
            received.extend_from_slice(&chunk);
        }
        assert_eq!(received, b"3.25\n");
    }

    #[tokio::test]
    async fn test_tcp_connector_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        assert!(TcpConnector::new(address).connect().await.is_err());
    }
}
