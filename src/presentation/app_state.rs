// Application state for HTTP handlers
use crate::application::ingest_service::SharedPipeline;
use crate::infrastructure::broadcast_sink::BroadcastSink;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: SharedPipeline<BroadcastSink>,
    pub updates: BroadcastSink,
}
