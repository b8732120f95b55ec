use crate::domain::config::PipelineConfig;
use crate::domain::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "config/telemetry";
const ENV_PREFIX: &str = "TELEMETRY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    pub tick_interval_ms: u64,
    pub reconnect_delay_ms: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            reconnect_delay_ms: 2000,
        }
    }
}

impl IngestConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Serial {
        path: String,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
    },
    Tcp {
        address: String,
    },
    #[default]
    Stdin,
}

fn default_baud_rate() -> u32 {
    9600
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            channel_capacity: 256,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        if self.ingest.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.server.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }
}

/// Load `config/telemetry.*` (optional) overlaid with `TELEMETRY__SECTION__KEY` env vars
pub fn load_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    build_config(builder)
}

fn build_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}
