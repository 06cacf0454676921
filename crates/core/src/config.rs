use ::config::builder::DefaultState;
use ::config::{
    Config, ConfigBuilder, ConfigError as BuilderError, Environment, File, FileFormat, Source,
};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config/jsonrest.yaml";
const ENV_PREFIX: &str = "JSONREST";

/// Global configuration accessor for binaries. Library callers construct clients directly.
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(|| or_default(load_client_config()));

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub http_proxy: Option<String>,
    #[serde(default)]
    pub https_proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            http_proxy: None,
            https_proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration load failed: {0}")]
    Load(#[from] BuilderError),
    #[error("invalid proxy url: {0:?}")]
    InvalidProxy(String),
}

impl ClientConfig {
    /// Parse a configuration document held in memory, without consulting files or the environment.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from_str(source, FileFormat::Yaml));
        from_builder(builder)
    }

    /// Rejects proxy settings reqwest would choke on later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for proxy in [&self.http_proxy, &self.https_proxy].into_iter().flatten() {
            let trimmed = proxy.trim();
            let has_scheme = ["http://", "https://", "socks5://"]
                .iter()
                .any(|scheme| trimmed.starts_with(scheme));
            if trimmed.is_empty() || !has_scheme {
                return Err(ConfigError::InvalidProxy(proxy.clone()));
            }
        }
        Ok(())
    }
}

/// Layered load: `config/jsonrest.yaml` if present, then `JSONREST__*` environment variables.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    // Pick up a .env from the working directory or its parents, if there is one.
    let _ = dotenv();

    from_builder(layered(
        File::with_name(DEFAULT_CONFIG_PATH).required(false),
        env_source(),
    ))
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

/// Environment values override the file.
fn layered<F>(file: F, env: Environment) -> ConfigBuilder<DefaultState>
where
    F: Source + Send + Sync + 'static,
{
    Config::builder().add_source(file).add_source(env)
}

fn or_default(loaded: Result<ClientConfig, ConfigError>) -> ClientConfig {
    match loaded {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("falling back to default client configuration: {}", err);
            ClientConfig::default()
        }
    }
}

fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

fn default_user_agent() -> String {
    "jsonrest/0.1".to_string()
}
