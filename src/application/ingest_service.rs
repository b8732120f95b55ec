// Ingest service - drives the pipeline from a byte source and a fixed-interval tick
use crate::application::byte_source::{ByteSource, SourceConnector};
use crate::application::pipeline::{DisplaySink, TelemetryPipeline};
use crate::domain::error::ConfigError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// The whole pipeline behind one lock; never held across an `.await`.
pub type SharedPipeline<S> = Arc<Mutex<TelemetryPipeline<S>>>;

pub fn lock_pipeline<S: DisplaySink>(pipeline: &SharedPipeline<S>) -> MutexGuard<'_, TelemetryPipeline<S>> {
    // Pipeline methods leave state consistent even if a sink panicked mid-update
    pipeline.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct IngestService<S: DisplaySink> {
    pipeline: SharedPipeline<S>,
    tick_interval: Duration,
    reconnect_delay: Duration,
}

impl<S: DisplaySink> Clone for IngestService<S> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            tick_interval: self.tick_interval,
            reconnect_delay: self.reconnect_delay,
        }
    }
}

impl<S: DisplaySink> IngestService<S> {
    pub fn new(
        pipeline: SharedPipeline<S>,
        tick_interval: Duration,
        reconnect_delay: Duration,
    ) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(Self {
            pipeline,
            tick_interval,
            reconnect_delay,
        })
    }

    pub fn pipeline(&self) -> &SharedPipeline<S> {
        &self.pipeline
    }

    /// Connect, ingest until the source ends or fails, reset, wait, repeat.
    pub async fn run(&self, connector: &dyn SourceConnector) {
        loop {
            let port = connector.name();

            match connector.connect().await {
                Ok(mut source) => {
                    tracing::info!("Opened telemetry source {}", port);

                    match self.run_session(source.as_mut(), &port).await {
                        Ok(()) => tracing::info!("Telemetry source {} closed", port),
                        Err(e) => tracing::warn!("Lost telemetry source {}: {:#}", port, e),
                    }

                    {
                        let mut pipeline = lock_pipeline(&self.pipeline);
                        pipeline.reset();
                        pipeline.detach_port();
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to open telemetry source {}: {:#}", port, e);
                }
            }

            tracing::debug!("Reconnecting to {} in {:?}", port, self.reconnect_delay);
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    /// Feed one open source into the pipeline, interleaving shrink ticks.
    /// Returns `Ok(())` at end of stream and the read error otherwise.
    pub async fn run_session(&self, source: &mut dyn ByteSource, port: &str) -> anyhow::Result<()> {
        lock_pipeline(&self.pipeline).attach_port(port);

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    lock_pipeline(&self.pipeline).on_tick();
                }
                chunk = source.read_chunk() => {
                    let Some(chunk) = chunk? else {
                        return Ok(());
                    };
                    let accepted = lock_pipeline(&self.pipeline).on_bytes(&chunk);
                    tracing::trace!("Read {} bytes from {}, {} samples accepted", chunk.len(), port, accepted);
                }
            }
        }
    }
}
