// Chunked streaming of display updates - length-prefixed JSON frames
use crate::domain::telemetry::DisplayUpdate;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

pub const FRAME_CONTENT_TYPE: &str = "application/x-telemetry-frames";

/// Create a chunked streaming response, one frame per update
pub async fn chunked_update_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = DisplayUpdate> + Send + 'static,
{
    let byte_stream = stream.then(move |update| async move { encode_frame(&update, compress).await });

    let body = Body::from_stream(byte_stream);

    // NOTE: No Content-Encoding header; frames are compressed individually,
    // the HTTP body itself is not.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Encode one update: 4-byte big-endian length, then the (optionally Brotli) JSON payload
pub async fn encode_frame(update: &DisplayUpdate, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(update).map_err(std::io::Error::other)?;

    let payload = if compress {
        let mut encoder = BrotliEncoder::new(std::io::Cursor::new(json));
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await?;
        compressed
    } else {
        json
    };

    let mut frame = BytesMut::with_capacity(4 + payload.len());
    frame.put_u32(payload.len() as u32);
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

/// Stream every update published after subscription until the publisher goes away
pub async fn stream_from_receiver(rx: broadcast::Receiver<DisplayUpdate>, compress: bool) -> impl IntoResponse {
    let stream = async_stream::stream! {
        let mut updates = BroadcastStream::new(rx);
        while let Some(item) = updates.next().await {
            match item {
                Ok(update) => yield update,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!("Display stream subscriber lagged, skipped {} updates", skipped);
                }
            }
        }
    };

    match chunked_update_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
